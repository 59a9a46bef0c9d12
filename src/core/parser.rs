// uastats - core/parser.rs
//
// Combined-log-format line parser.
// Core layer: works on `&str` lines, never touches the filesystem.

use crate::core::model::LogRecord;
use regex::Regex;
use std::sync::OnceLock;

/// The combined format, anchored at both ends:
///
/// `%h %l %u %t "%r" %s %b "%{Referer}i" "%{User-Agent}i"`
///
/// `%l` is always `-` in practice and is matched literally. The request
/// capture is greedy up to the last `HTTP/1.0"` or `HTTP/1.1"`, and the
/// user-agent capture runs to the final quote on the line, so brackets and
/// quotes inside either field are kept intact.
const COMBINED_PATTERN: &str = concat!(
    r"^(\d+\.\d+\.\d+\.\d+)\s-\s(\S+)\s",
    r"\[([^\]]+)\]\s",
    r#""(.+)HTTP/1\.[01]"\s"#,
    r"(\d+)\s(\d+|-)\s",
    r#""([^"]*)"\s"(.*)"$"#,
);

fn combined_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Constant pattern; covered by the tests below.
    RE.get_or_init(|| Regex::new(COMBINED_PATTERN).expect("combined log pattern must compile"))
}

/// Drop the single space between the request and its `HTTP/1.x` token.
/// Any other trailing whitespace belongs to the request and is kept.
fn strip_version_separator(request: &str) -> &str {
    request.strip_suffix(' ').unwrap_or(request)
}

/// Turns raw access-log lines into [`LogRecord`]s.
///
/// Stateless apart from the shared compiled pattern, so one instance can be
/// reused for every line of every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser;

impl LineParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line, without its terminating newline.
    ///
    /// Returns `None` when the line does not satisfy the whole grammar. The
    /// record is built only after every field has matched, so a record is
    /// never partially populated.
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        let caps = combined_regex().captures(line)?;
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();

        Some(LogRecord {
            remote_host: field(1),
            remote_user: field(2),
            timestamp: field(3),
            request_line: strip_version_separator(caps.get(4).map_or("", |m| m.as_str()))
                .to_string(),
            status_code: field(5),
            bytes_sent: field(6),
            referrer: field(7),
            user_agent: field(8),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

    #[allow(clippy::too_many_arguments)]
    fn line(
        host: &str,
        user: &str,
        ts: &str,
        request: &str,
        version: &str,
        status: &str,
        bytes: &str,
        referrer: &str,
        agent: &str,
    ) -> String {
        format!(
            r#"{host} - {user} [{ts}] "{request} {version}" {status} {bytes} "{referrer}" "{agent}""#
        )
    }

    #[test]
    fn test_parse_reproduces_every_field() {
        let parser = LineParser::new();
        let raw = line(
            "192.168.1.20",
            "frank",
            "10/Oct/2000:13:55:36 -0700",
            "GET /apache_pb.gif",
            "HTTP/1.0",
            "200",
            "2326",
            "http://www.example.com/start.html",
            FIREFOX,
        );

        let rec = parser.parse(&raw).expect("well-formed line should parse");
        assert_eq!(rec.remote_host, "192.168.1.20");
        assert_eq!(rec.remote_user, "frank");
        assert_eq!(rec.timestamp, "10/Oct/2000:13:55:36 -0700");
        assert_eq!(rec.request_line, "GET /apache_pb.gif");
        assert_eq!(rec.status_code, "200");
        assert_eq!(rec.bytes_sent, "2326");
        assert_eq!(rec.referrer, "http://www.example.com/start.html");
        assert_eq!(rec.user_agent, FIREFOX);
    }

    #[test]
    fn test_parse_varied_field_values() {
        let parser = LineParser::new();
        let cases = [
            ("1.2.3.4", "-", "POST /login?next=/a", "HTTP/1.1", "302", "-", "", ""),
            ("255.255.255.255", "bob", "HEAD /", "HTTP/1.0", "404", "0", "-", "curl/8.0"),
            ("10.0.0.1", "-", "GET /a b c", "HTTP/1.1", "500", "17", "x", "say \"hi\""),
        ];
        for (host, user, req, ver, status, bytes, referrer, agent) in cases {
            let raw = line(host, user, "01/Jan/2024:00:00:00 +0000", req, ver, status, bytes, referrer, agent);
            let rec = parser.parse(&raw).unwrap_or_else(|| panic!("should parse: {raw}"));
            assert_eq!(rec.remote_host, host);
            assert_eq!(rec.remote_user, user);
            assert_eq!(rec.request_line, req);
            assert_eq!(rec.status_code, status);
            assert_eq!(rec.bytes_sent, bytes);
            assert_eq!(rec.referrer, referrer);
            assert_eq!(rec.user_agent, agent);
        }
    }

    #[test]
    fn test_parse_keeps_brackets_inside_user_agent() {
        let agent = "Mozilla/5.0 (Linux; Android 5.0) [FB_IAB/FB4A;FBAV/47.0.0.25.125;] trailing]";
        let raw = line("8.8.8.8", "-", "01/Jan/2024:00:00:00 +0000", "GET /", "HTTP/1.1", "200", "5", "", agent);
        let rec = LineParser::new().parse(&raw).expect("should parse");
        assert_eq!(rec.user_agent, agent);
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let parser = LineParser::new();
        let good = line("1.2.3.4", "-", "01/Jan/2024:00:00:00 +0000", "GET /", "HTTP/1.1", "200", "5", "", "ua");
        assert!(parser.parse(&good).is_some());

        let malformed = [
            String::new(),
            "garbage".to_string(),
            // hostname instead of IPv4
            good.replacen("1.2.3.4", "example.com", 1),
            // IPv6
            good.replacen("1.2.3.4", "::1", 1),
            // three octets
            good.replacen("1.2.3.4", "1.2.3", 1),
            // missing HTTP marker
            good.replacen("HTTP/1.1", "", 1),
            // unsupported version
            good.replacen("HTTP/1.1", "HTTP/2.0", 1),
            // missing closing quote on the user agent
            good.trim_end_matches('"').to_string(),
            // non-numeric status
            good.replacen(" 200 ", " OK ", 1),
            // bytes neither digits nor dash
            good.replacen(" 5 ", " five ", 1),
            // missing timestamp brackets
            good.replacen('[', "", 1),
        ];
        for raw in &malformed {
            assert!(parser.parse(raw).is_none(), "should not parse: {raw:?}");
        }
    }

    #[test]
    fn test_parse_keeps_request_trailing_whitespace() {
        let parser = LineParser::new();
        for req in ["GET /a ", "GET /a\t", "GET /a\u{a0}"] {
            let raw = line("1.2.3.4", "-", "01/Jan/2024:00:00:00 +0000", req, "HTTP/1.1", "200", "5", "", "ua");
            let rec = parser.parse(&raw).unwrap_or_else(|| panic!("should parse: {raw:?}"));
            assert_eq!(rec.request_line, req);
        }
    }

    #[test]
    fn test_parse_request_without_separating_space() {
        let raw = r#"1.2.3.4 - - [01/Jan/2024:00:00:00 +0000] "-HTTP/1.0" 400 - "" """#;
        let rec = LineParser::new().parse(raw).expect("should parse");
        assert_eq!(rec.request_line, "-");
        assert_eq!(rec.user_agent, "");
    }
}
