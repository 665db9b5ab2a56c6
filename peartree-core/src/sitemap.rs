/// `sitemap.xml` listing each URL once, sorted.
pub fn render_sitemap<I, S>(urls: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut urls: Vec<String> = urls.into_iter().map(|u| u.as_ref().to_string()).collect();
    urls.sort();
    urls.dedup();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for url in &urls {
        xml.push_str("  <url><loc>");
        xml.push_str(&html_escape::encode_text(url));
        xml.push_str("</loc></url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}
