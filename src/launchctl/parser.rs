//! Parser for `launchctl print` output
//!
//! launchctl's print format is a human-oriented, brace-delimited text dump with
//! no formal grammar: nesting by brace depth, objects (`key = value`), arrow
//! maps (`key => value`), bare string lists, and loosely typed scalars. Only
//! the header line is load-bearing; everything below it degrades gracefully,
//! since Apple does not guarantee the format and partial data beats no status
//! display at all.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum PrintParseError {
    #[error("unrecognized print header: '{0}'")]
    BadHeader(String),
}

/// A value in launchctl print output.
///
/// Arrow-map values stay raw strings; scalar coercion (int, hex, pipe list)
/// only applies to `key = value` lines.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintValue {
    String(String),
    Int(i64),
    List(Vec<String>),
    Map(HashMap<String, String>),
    Object(HashMap<String, PrintValue>),
}

impl fmt::Display for PrintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintValue::String(s) => write!(f, "{}", s),
            PrintValue::Int(n) => write!(f, "{}", n),
            PrintValue::List(items) => write!(f, "{}", items.join(" | ")),
            PrintValue::Map(map) => {
                let mut pairs: Vec<String> =
                    map.iter().map(|(k, v)| format!("{} => {}", k, v)).collect();
                pairs.sort();
                write!(f, "{}", pairs.join(", "))
            }
            PrintValue::Object(obj) => {
                let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
                keys.sort_unstable();
                write!(f, "{{{}}}", keys.join(", "))
            }
        }
    }
}

/// Parsed `launchctl print` output, queryable by top-level key.
#[derive(Debug, Default)]
pub struct PrintData {
    data: HashMap<String, PrintValue>,
}

impl PrintData {
    /// Rendered string for a key. Absent keys yield an empty string so status
    /// rendering never has to branch on missing fields.
    pub fn get(&self, key: &str) -> String {
        self.data.get(key).map(|v| v.to_string()).unwrap_or_default()
    }

    /// The raw typed value for a key.
    pub fn get_raw(&self, key: &str) -> Option<&PrintValue> {
        self.data.get(key)
    }

    /// All stored top-level keys, for exhaustive dumps.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

/// Parse a full `launchctl print <target>` dump.
///
/// The first line must look like `system/com.example.foo = {`; anything else
/// fails the whole parse. The body is parsed as an object.
pub fn parse_print(input: &str) -> Result<PrintData, PrintParseError> {
    let lines: Vec<&str> = input.lines().collect();
    let header = lines
        .first()
        .ok_or_else(|| PrintParseError::BadHeader(String::new()))?;
    if !header.contains(" = {") {
        return Err(PrintParseError::BadHeader(header.to_string()));
    }

    Ok(PrintData {
        data: parse_object(&lines[1..]),
    })
}

/// Parse `key = value` lines up to the matching closing brace.
///
/// Blank lines and lines without ` = ` are skipped; launchctl sprinkles
/// decorative lines through some sections.
fn parse_object(lines: &[&str]) -> HashMap<String, PrintValue> {
    let mut obj = HashMap::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }
        if line == "}" {
            break;
        }

        let Some((key, value)) = line.split_once(" = ") else {
            i += 1;
            continue;
        };

        if value.trim() == "{" {
            // Nested block: body is the lines strictly between the braces.
            let end = find_block_end(lines, i + 1);
            let body = &lines[i + 1..end];
            obj.insert(key.trim().to_string(), parse_nested(body));
            i = end + 1;
        } else {
            obj.insert(key.trim().to_string(), parse_scalar(value));
            i += 1;
        }
    }

    obj
}

/// Index of the line closing a block opened just before `start` (depth 1).
/// Nested blocks open as `key = {` (or, rarely, a bare `{`), so any line
/// ending in an open brace deepens the scope. An unterminated block runs to
/// the end of input.
fn find_block_end(lines: &[&str], start: usize) -> usize {
    let mut depth = 1usize;
    for (offset, line) in lines[start..].iter().enumerate() {
        let trimmed = line.trim();
        if trimmed == "}" {
            depth -= 1;
            if depth == 0 {
                return start + offset;
            }
        } else if trimmed.ends_with('{') {
            depth += 1;
        }
    }
    lines.len()
}

/// Classify a nested block body: arrow map, object, or bare string list.
fn parse_nested(lines: &[&str]) -> PrintValue {
    if lines.iter().any(|l| l.contains(" => ")) {
        return PrintValue::Map(parse_map(lines));
    }
    if lines.iter().any(|l| l.contains(" = ")) {
        return PrintValue::Object(parse_object(lines));
    }
    PrintValue::List(
        lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Parse `key => value` lines; anything else in the block is ignored.
fn parse_map(lines: &[&str]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in lines {
        if let Some((key, value)) = line.split_once(" => ") {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

/// Decode a scalar: pipe-delimited list, decimal int, hex int, or raw string.
fn parse_scalar(value: &str) -> PrintValue {
    if value.contains(" | ") {
        return PrintValue::List(value.split(" | ").map(|s| s.trim().to_string()).collect());
    }

    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = value.parse::<i64>() {
            return PrintValue::Int(n);
        }
    }

    if let Some(hex) = value.strip_prefix("0x") {
        if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            if let Ok(n) = i64::from_str_radix(hex, 16) {
                return PrintValue::Int(n);
            }
        }
    }

    PrintValue::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_header_fails() {
        let result = parse_print("state = running\n}");
        assert!(matches!(result, Err(PrintParseError::BadHeader(_))));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(parse_print("").is_err());
    }

    #[test]
    fn test_simple_scalars() {
        let input = "system/com.example.foo = {\n\
                     \tstate = running\n\
                     \tactive count = 1\n\
                     }";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get("state"), "running");
        assert_eq!(data.get("active count"), "1");
        assert_eq!(data.get_raw("active count"), Some(&PrintValue::Int(1)));
    }

    #[test]
    fn test_hex_scalar_decodes_numeric_value() {
        let input = "system/foo = {\n\tmask = 0x1ed\n}";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get_raw("mask"), Some(&PrintValue::Int(493)));
        assert_eq!(data.get("mask"), "493");
    }

    #[test]
    fn test_hex_without_digits_is_string() {
        let input = "system/foo = {\n\tvalue = 0x\n}";
        let data = parse_print(input).unwrap();
        assert_eq!(
            data.get_raw("value"),
            Some(&PrintValue::String("0x".to_string()))
        );
    }

    #[test]
    fn test_pipe_delimited_scalar_list() {
        let input = "system/foo = {\n\tflags = a | b | c\n}";
        let data = parse_print(input).unwrap();
        assert_eq!(
            data.get_raw("flags"),
            Some(&PrintValue::List(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            ]))
        );
    }

    #[test]
    fn test_string_with_internal_spaces() {
        let input = "system/foo = {\n\tpath = /Library/Launch Daemons/foo.plist\n}";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get("path"), "/Library/Launch Daemons/foo.plist");
    }

    #[test]
    fn test_arrow_map_values_not_coerced() {
        let input = "system/foo = {\n\
                     \tprogram = {\n\
                     \t\tpath => /usr/bin/foo\n\
                     \t\tmode => 0x1ed\n\
                     \t}\n\
                     }";
        let data = parse_print(input).unwrap();
        let Some(PrintValue::Map(map)) = data.get_raw("program") else {
            panic!("expected arrow map");
        };
        assert_eq!(map["path"], "/usr/bin/foo");
        // Stays a raw string inside a map, unlike the top-level hex rule.
        assert_eq!(map["mode"], "0x1ed");
    }

    #[test]
    fn test_nested_object() {
        let input = "system/foo = {\n\
                     \tevents = {\n\
                     \t\tcount = 3\n\
                     \t\tname = hello\n\
                     \t}\n\
                     }";
        let data = parse_print(input).unwrap();
        let Some(PrintValue::Object(obj)) = data.get_raw("events") else {
            panic!("expected object");
        };
        assert_eq!(obj.get("count"), Some(&PrintValue::Int(3)));
        assert_eq!(obj.get("name"), Some(&PrintValue::String("hello".to_string())));
    }

    #[test]
    fn test_bare_string_list() {
        let input = "system/foo = {\n\
                     \targuments = {\n\
                     \t\t/usr/bin/foo\n\
                     \t\t--verbose\n\
                     \t}\n\
                     }";
        let data = parse_print(input).unwrap();
        assert_eq!(
            data.get_raw("arguments"),
            Some(&PrintValue::List(vec![
                "/usr/bin/foo".to_string(),
                "--verbose".to_string()
            ]))
        );
    }

    #[test]
    fn test_empty_block_is_empty_list() {
        let input = "system/foo = {\n\tproperties = {\n\t}\n}";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get_raw("properties"), Some(&PrintValue::List(vec![])));
    }

    #[test]
    fn test_keys_after_nested_block_still_parsed() {
        let input = "system/foo = {\n\
                     \tprogram = {\n\
                     \t\tpath => /usr/bin/foo\n\
                     \t}\n\
                     \tstate = running\n\
                     }";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get("state"), "running");
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let input = "system/foo = {\n\
                     \touter = {\n\
                     \t\tinner = {\n\
                     \t\t\tdepth = 2\n\
                     \t\t}\n\
                     \t\tafter = inner\n\
                     \t}\n\
                     \ttail = 9\n\
                     }";
        let data = parse_print(input).unwrap();
        let Some(PrintValue::Object(outer)) = data.get_raw("outer") else {
            panic!("expected object");
        };
        let Some(PrintValue::Object(inner)) = outer.get("inner") else {
            panic!("expected inner object");
        };
        assert_eq!(inner.get("depth"), Some(&PrintValue::Int(2)));
        assert_eq!(outer.get("after"), Some(&PrintValue::String("inner".to_string())));
        assert_eq!(data.get("tail"), "9");
    }

    #[test]
    fn test_nested_block_scoping_does_not_leak() {
        // The inner block's closing brace must not terminate the outer one:
        // keys after an inner block stay inside their parent, and keys after
        // the outer block stay at the top level.
        let input = "system/foo = {\n\
                     \tfirst = {\n\
                     \t\tinner = {\n\
                     \t\t\tdepth = 3\n\
                     \t\t}\n\
                     \t\tsibling = 1\n\
                     \t}\n\
                     \tsecond = {\n\
                     \t\tvalue = 2\n\
                     \t}\n\
                     \tlast = done\n\
                     }";
        let data = parse_print(input).unwrap();

        let Some(PrintValue::Object(first)) = data.get_raw("first") else {
            panic!("expected first to be an object");
        };
        assert!(matches!(first.get("inner"), Some(PrintValue::Object(_))));
        assert_eq!(first.get("sibling"), Some(&PrintValue::Int(1)));
        assert!(data.get_raw("sibling").is_none(), "sibling leaked to top level");

        let Some(PrintValue::Object(second)) = data.get_raw("second") else {
            panic!("expected second to be an object");
        };
        assert_eq!(second.get("value"), Some(&PrintValue::Int(2)));
        assert_eq!(data.get("last"), "done");
    }

    #[test]
    fn test_decorative_lines_skipped() {
        let input = "system/foo = {\n\
                     \tstate = running\n\
                     \tsome decorative line without equals\n\
                     \tpid = 42\n\
                     }";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get("state"), "running");
        assert_eq!(data.get("pid"), "42");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let input = "system/foo = {\n\n\tstate = running\n\n}";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get("state"), "running");
    }

    #[test]
    fn test_absent_key_is_empty_string() {
        let input = "system/foo = {\n\tstate = running\n}";
        let data = parse_print(input).unwrap();
        assert_eq!(data.get("no such key"), "");
        assert!(data.get_raw("no such key").is_none());
    }

    #[test]
    fn test_unterminated_block_degrades() {
        let input = "system/foo = {\n\
                     \tevents = {\n\
                     \t\tcount = 3\n";
        let data = parse_print(input).unwrap();
        let Some(PrintValue::Object(obj)) = data.get_raw("events") else {
            panic!("expected object");
        };
        assert_eq!(obj.get("count"), Some(&PrintValue::Int(3)));
    }

    #[test]
    fn test_keys_enumeration() {
        let input = "system/foo = {\n\tstate = running\n\tpid = 42\n}";
        let data = parse_print(input).unwrap();
        let mut keys: Vec<&str> = data.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["pid", "state"]);
    }
}
