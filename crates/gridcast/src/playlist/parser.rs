//! M3U playlist parsing
//!
//! Converts raw extended-M3U text into an ordered sequence of channels.
//! Parsing never fails: malformed entries are dropped, everything else is
//! ignored.

use crate::config::playlist::{
    ALLOWED_SCHEMES, ATTR_EPG_ID, ATTR_GROUP, ATTR_LOGO, EXTINF_PREFIX, GENERAL_GROUP,
};
use crate::playlist::types::{channel_id, Channel};

/// Pending metadata accumulated from the most recent `#EXTINF:` line
#[derive(Debug, Default)]
struct ExtInf {
    name: Option<String>,
    logo: Option<String>,
    group: Option<String>,
    epg_id: Option<String>,
}

/// Parse extended-M3U text into channels, in source order
///
/// A channel is emitted for each allowed-scheme URL line that follows a
/// metadata line carrying a non-empty display name. `order` counts
/// emissions from 0. A URL line with no preceding metadata contributes
/// nothing and resets the accumulator for the next entry.
pub fn parse(text: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    let mut pending: Option<ExtInf> = None;

    for line in text.lines() {
        let line = line.trim();

        if line.starts_with(EXTINF_PREFIX) {
            // Each metadata line fully overwrites the pending accumulator
            pending = Some(parse_extinf(line));
        } else if is_stream_line(line) {
            if let Some(info) = pending.take() {
                // Entries without a name never become channels
                if let Some(name) = info.name {
                    let order = channels.len() as u32;
                    channels.push(Channel {
                        id: channel_id(&name, line),
                        name,
                        stream_url: line.to_string(),
                        logo_url: info.logo,
                        group: info.group.unwrap_or_else(|| GENERAL_GROUP.to_string()),
                        epg_id: info.epg_id,
                        order,
                    });
                }
            }
        }
        // Comments, blank lines and unrelated directives are ignored
    }

    channels
}

/// Whether a trimmed line starts with one of the allowed URI schemes
fn is_stream_line(line: &str) -> bool {
    ALLOWED_SCHEMES
        .iter()
        .any(|scheme| line.starts_with(scheme))
}

/// Parse an `#EXTINF:` metadata line
///
/// The display name is everything after the *last* comma; titles may
/// legitimately contain commas before the final separator.
fn parse_extinf(line: &str) -> ExtInf {
    let name = line
        .rsplit_once(',')
        .map(|(_, after)| after.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    ExtInf {
        name,
        logo: extract_attribute(line, ATTR_LOGO),
        group: extract_attribute(line, ATTR_GROUP),
        epg_id: extract_attribute(line, ATTR_EPG_ID),
    }
}

/// Extract a `key="value"` attribute, matching the key case-insensitively
///
/// Empty values resolve to `None`. The key must sit at the start of the
/// line or after whitespace so that e.g. `tvg-id` never matches inside
/// `x-tvg-id`.
fn extract_attribute(line: &str, key: &str) -> Option<String> {
    let bytes = line.as_bytes();
    let key_bytes = key.as_bytes();

    let mut pos = 0;
    while pos + key_bytes.len() + 2 <= bytes.len() {
        let at_boundary = pos == 0 || bytes[pos - 1].is_ascii_whitespace();
        if at_boundary
            && bytes[pos..pos + key_bytes.len()].eq_ignore_ascii_case(key_bytes)
            && bytes[pos + key_bytes.len()] == b'='
            && bytes[pos + key_bytes.len() + 1] == b'"'
        {
            // Match is pure ASCII, so these offsets are char boundaries
            let rest = &line[pos + key_bytes.len() + 2..];
            let end = rest.find('"')?;
            let value = &rest[..end];
            return if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        pos += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- parse: basic shapes ---

    #[test]
    fn parse_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn parse_no_metadata_lines() {
        let text = "# a comment\n\nsome unrelated line\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn parse_single_channel_with_all_attributes() {
        let text = "#EXTINF:-1 tvg-logo=\"http://x/logo.png\" group-title=\"News\" tvg-id=\"n1\",Channel One\nhttp://example.com/1.m3u8\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);

        let ch = &channels[0];
        assert_eq!(ch.name, "Channel One");
        assert_eq!(ch.stream_url, "http://example.com/1.m3u8");
        assert_eq!(ch.logo_url.as_deref(), Some("http://x/logo.png"));
        assert_eq!(ch.group, "News");
        assert_eq!(ch.epg_id.as_deref(), Some("n1"));
        assert_eq!(ch.order, 0);
    }

    #[test]
    fn parse_assigns_order_by_emission() {
        let text = "#EXTINF:-1,One\nhttp://a/1\n#EXTINF:-1,Two\nhttp://a/2\n#EXTINF:-1,Three\nhttp://a/3\n";
        let channels = parse(text);
        let orders: Vec<u32> = channels.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn parse_ids_are_distinct_and_stable() {
        let text = "#EXTINF:-1,One\nhttp://a/1\n#EXTINF:-1,Two\nhttp://a/2\n";
        let first = parse(text);
        let second = parse(text);
        assert_ne!(first[0].id, first[1].id);
        // Same entry keeps the same ID across re-parses
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[1].id, second[1].id);
    }

    // --- parse: malformed input ---

    #[test]
    fn parse_url_without_metadata_is_dropped() {
        let text = "http://example.com/orphan.m3u8\n#EXTINF:-1,Real\nhttp://example.com/real.m3u8\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Real");
        assert_eq!(channels[0].order, 0);
    }

    #[test]
    fn parse_orphan_url_does_not_corrupt_accumulator() {
        // URL, then orphan URL, then a proper entry: the orphan must not
        // inherit the earlier metadata
        let text = "#EXTINF:-1,First\nhttp://a/1\nhttp://a/orphan\n#EXTINF:-1,Second\nhttp://a/2\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].name, "First");
        assert_eq!(channels[1].name, "Second");
    }

    #[test]
    fn parse_metadata_without_url_yields_nothing() {
        let text = "#EXTINF:-1,Dangling\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn parse_second_metadata_overwrites_first() {
        let text = "#EXTINF:-1 group-title=\"Old\",Stale\n#EXTINF:-1,Fresh\nhttp://a/1\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Fresh");
        // The overwrite is total: no group bleeds over from the stale line
        assert_eq!(channels[0].group, GENERAL_GROUP);
    }

    #[test]
    fn parse_empty_name_is_dropped() {
        let text = "#EXTINF:-1,\nhttp://a/1\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn parse_whitespace_only_name_is_dropped() {
        let text = "#EXTINF:-1,   \nhttp://a/1\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn parse_no_comma_on_extinf_is_dropped() {
        let text = "#EXTINF:-1 tvg-id=\"x\"\nhttp://a/1\n";
        assert!(parse(text).is_empty());
    }

    // --- parse: name extraction ---

    #[test]
    fn parse_name_splits_on_last_comma() {
        let text = "#EXTINF:-1,Sub, Title\nhttp://a/1\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Title");
    }

    #[test]
    fn parse_name_is_trimmed() {
        let text = "#EXTINF:-1,  Padded Name  \nhttp://a/1\n";
        assert_eq!(parse(text)[0].name, "Padded Name");
    }

    // --- parse: schemes ---

    #[test]
    fn parse_accepts_all_allowed_schemes() {
        let text = "#EXTINF:-1,A\nhttp://a/1\n#EXTINF:-1,B\nhttps://a/2\n#EXTINF:-1,C\nrtmp://a/3\n#EXTINF:-1,D\nrtsp://a/4\n";
        assert_eq!(parse(text).len(), 4);
    }

    #[test]
    fn parse_rejects_unknown_scheme() {
        let text = "#EXTINF:-1,A\nftp://a/1\n";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn parse_tolerates_indented_lines() {
        let text = "  #EXTINF:-1,A\n  http://a/1\n";
        assert_eq!(parse(text).len(), 1);
    }

    #[test]
    fn parse_crlf_line_endings() {
        let text = "#EXTINF:-1,A\r\nhttp://a/1\r\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].stream_url, "http://a/1");
    }

    // --- parse: groups ---

    #[test]
    fn parse_missing_group_defaults_to_general() {
        let text = "#EXTINF:-1,A\nhttp://a/1\n";
        assert_eq!(parse(text)[0].group, GENERAL_GROUP);
    }

    #[test]
    fn parse_empty_group_defaults_to_general() {
        let text = "#EXTINF:-1 group-title=\"\",A\nhttp://a/1\n";
        assert_eq!(parse(text)[0].group, GENERAL_GROUP);
    }

    // --- extract_attribute ---

    #[test]
    fn attribute_basic() {
        let line = "#EXTINF:-1 tvg-logo=\"http://x/l.png\",Name";
        assert_eq!(
            extract_attribute(line, "tvg-logo"),
            Some("http://x/l.png".to_string())
        );
    }

    #[test]
    fn attribute_key_is_case_insensitive() {
        let line = "#EXTINF:-1 TVG-LOGO=\"http://x/l.png\",Name";
        assert_eq!(
            extract_attribute(line, "tvg-logo"),
            Some("http://x/l.png".to_string())
        );
    }

    #[test]
    fn attribute_absent_is_none() {
        assert_eq!(extract_attribute("#EXTINF:-1,Name", "tvg-logo"), None);
    }

    #[test]
    fn attribute_empty_value_is_none() {
        assert_eq!(
            extract_attribute("#EXTINF:-1 tvg-id=\"\",Name", "tvg-id"),
            None
        );
    }

    #[test]
    fn attribute_requires_word_boundary() {
        // "tvg-id" must not match inside "x-tvg-id"
        let line = "#EXTINF:-1 x-tvg-id=\"wrong\",Name";
        assert_eq!(extract_attribute(line, "tvg-id"), None);
    }

    #[test]
    fn attribute_value_may_contain_non_ascii() {
        let line = "#EXTINF:-1 group-title=\"Haberler\" tvg-id=\"türk1\",Kanal";
        assert_eq!(
            extract_attribute(line, "tvg-id"),
            Some("türk1".to_string())
        );
    }

    #[test]
    fn attribute_after_non_ascii_text() {
        // Non-ASCII bytes before the key must not break offset handling
        let line = "#EXTINF:-1 tvg-name=\"Türkçe\" group-title=\"Müzik\",Kanal";
        assert_eq!(
            extract_attribute(line, "group-title"),
            Some("Müzik".to_string())
        );
    }

    #[test]
    fn attribute_unterminated_quote_is_none() {
        let line = "#EXTINF:-1 tvg-id=\"unclosed,Name";
        assert_eq!(extract_attribute(line, "tvg-id"), None);
    }

    // --- end-to-end scenario ---

    #[test]
    fn parse_two_channel_scenario() {
        let text = "#EXTINF:-1 tvg-logo=\"http://x/logo.png\" group-title=\"News\" tvg-id=\"n1\",Channel One\nhttp://example.com/1.m3u8\n#EXTINF:-1,Channel Two\nhttps://example.com/2.m3u8\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 2);

        let one = &channels[0];
        assert_eq!(one.name, "Channel One");
        assert_eq!(one.group, "News");
        assert_eq!(one.logo_url.as_deref(), Some("http://x/logo.png"));
        assert_eq!(one.epg_id.as_deref(), Some("n1"));
        assert_eq!(one.order, 0);

        let two = &channels[1];
        assert_eq!(two.name, "Channel Two");
        assert_eq!(two.group, GENERAL_GROUP);
        assert_eq!(two.logo_url, None);
        assert_eq!(two.epg_id, None);
        assert_eq!(two.order, 1);

        assert_ne!(one.id, two.id);
    }
}
