//! RSS 2.0 renderer.
//!
//! Renders cached items into an RSS document with an Atom self link.

use chrono::{DateTime, Utc};
use regal_core::Item;

/// RFC 822 style date used for `pubDate` and `lastBuildDate`.
pub const TIME_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

pub const CHANNEL_TITLE: &str = "Regal Movies";
pub const CHANNEL_DESCRIPTION: &str = "This feed contains Regal new movie entries.";

/// Channel-level values that are not derived from the items.
#[derive(Debug, Clone)]
pub struct Channel<'a> {
    pub link: &'a str,
    pub self_href: &'a str,
    pub last_build: DateTime<Utc>,
}

/// Render the RSS document.
pub fn render_rss(channel: &Channel<'_>, items: &[Item]) -> String {
    let mut buf = String::with_capacity(512 + items.len() * 384);

    buf.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n");
    buf.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
    buf.push_str("  <channel>\n");
    push_element(&mut buf, 4, "title", CHANNEL_TITLE);
    push_element(&mut buf, 4, "link", channel.link);
    buf.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\" />\n",
        escape_xml(channel.self_href)
    ));
    push_element(&mut buf, 4, "description", CHANNEL_DESCRIPTION);
    push_element(&mut buf, 4, "lastBuildDate", &channel.last_build.format(TIME_FORMAT).to_string());
    push_element(&mut buf, 4, "language", "en");

    for item in items {
        buf.push_str(&render_item(item));
    }

    buf.push_str("  </channel>\n");
    buf.push_str("</rss>\n");
    buf
}

fn render_item(item: &Item) -> String {
    let mut buf = String::new();
    buf.push_str("    <item>\n");
    push_element(&mut buf, 6, "title", &item.name);
    push_element(&mut buf, 6, "link", &item.url);
    push_element(&mut buf, 6, "guid", &item.url);
    push_element(&mut buf, 6, "pubDate", &item.post_time.format(TIME_FORMAT).to_string());

    let html = format!("<p><a href=\"{}\">{}</a></p>", escape_xml(&item.url), escape_xml(&item.name));
    buf.push_str(&format!("      <description>{}</description>\n", cdata(&html)));
    buf.push_str("    </item>\n");
    buf
}

fn push_element(buf: &mut String, indent: usize, tag: &str, text: &str) {
    buf.push_str(&format!("{:indent$}<{tag}>{}</{tag}>\n", "", escape_xml(text)));
}

/// Escape text for use in XML character data or a quoted attribute.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap `s` in a CDATA section, splitting any `]]>` so it cannot end the section.
fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(id: i64, name: &str, url: &str) -> Item {
        Item {
            id,
            url: url.to_string(),
            name: name.to_string(),
            length: 100,
            post_time: Utc.with_ymd_and_hms(2002, 10, 2, 15, 0, 0).unwrap(),
        }
    }

    fn channel() -> Channel<'static> {
        Channel {
            link: "https://www.regmovies.com/",
            self_href: "http://api.kanna.in/hnbest",
            last_build: Utc.with_ymd_and_hms(2002, 10, 2, 15, 5, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_channel_header() {
        let xml = render_rss(&channel(), &[]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\" ?>"));
        assert!(xml.contains("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">"));
        assert!(xml.contains("<title>Regal Movies</title>"));
        assert!(xml.contains("<link>https://www.regmovies.com/</link>"));
        assert!(xml.contains(
            "<atom:link href=\"http://api.kanna.in/hnbest\" rel=\"self\" type=\"application/rss+xml\" />"
        ));
        assert!(xml.contains("<lastBuildDate>02 Oct 2002 15:05:00 +0000</lastBuildDate>"));
        assert!(xml.contains("<language>en</language>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_render_items() {
        let items = [
            item(1, "Paper Moons", "https://example.com/pm"),
            item(2, "Small Hours", "https://example.com/sh"),
        ];
        let xml = render_rss(&channel(), &items);

        assert_eq!(xml.matches("<item>").count(), 2);
        assert!(xml.contains("<title>Paper Moons</title>"));
        assert!(xml.contains("<guid>https://example.com/sh</guid>"));
        assert!(xml.contains("<pubDate>02 Oct 2002 15:00:00 +0000</pubDate>"));
        assert!(xml.contains(
            "<description><![CDATA[<p><a href=\"https://example.com/pm\">Paper Moons</a></p>]]></description>"
        ));
    }

    #[test]
    fn test_render_escapes_text() {
        let items = [item(1, "Tom & Jerry <3", "https://example.com/?a=1&b=2")];
        let xml = render_rss(&channel(), &items);

        assert!(xml.contains("<title>Tom &amp; Jerry &lt;3</title>"));
        assert!(xml.contains("<link>https://example.com/?a=1&amp;b=2</link>"));
        assert!(!xml.contains("Tom & Jerry"));
    }

    #[test]
    fn test_cdata_cannot_be_closed_early() {
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(escape_xml("\"q\" & 'a'"), "&quot;q&quot; &amp; &#39;a&#39;");
    }
}
