//! Informational landing page.

use super::rss::escape_xml;

const SOURCE_URL: &str = "https://github.com/vrajeshkanna/hnbest";

/// Render the landing page that points readers at the feed.
pub fn render_index(feed_path: &str, default_count: u32) -> String {
    let feed_path = escape_xml(feed_path);
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Regal Movies RSS</title>
    <meta name="keywords" content="regal, movies, rss, best">
    <link rel="alternate" type="application/rss+xml" title="Regal Movies RSS" href="{feed_path}">
  </head>
  <body>
    <h1>
      Regal Movies RSS
      <a href="{feed_path}">RSS</a>
    </h1>
    <p>
      You can append the GET-parameter "count=n" to reduce the amount of news items to n. The default is {default_count}.
    </p>
    <p>
      The GET-parameter "link_comments=1" is accepted for compatibility with older feed readers. Listings have no discussion page, so it does not change the feed and every entry links to the film.
    </p>
    <p>
      <a href="{SOURCE_URL}">Github</a>
    </p>
  </body>
</html>
"#
    )
}
