use crate::error::{ScanForgeError, SfResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

pub const DEFAULT_DEFINE_PREFIX: &str = "KBD_EVENT_";

/// Symbolic key name -> key code, read from the `#define` lines of a C header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    codes: HashMap<String, u8>,
}

impl ConstantTable {
    pub fn load_from_file<P: AsRef<Path>>(path: P, define_prefix: &str) -> SfResult<Self> {
        let content = fs::read_to_string(&path)?;
        let table = Self::parse(&content, define_prefix)?;
        debug!(
            "Loaded {} key constants from {:?}",
            table.len(),
            path.as_ref()
        );
        Ok(table)
    }

    /// Collects `#define <prefix>NAME <hex>` lines. Everything else is ignored.
    pub fn parse(text: &str, define_prefix: &str) -> SfResult<Self> {
        let mut codes = HashMap::new();

        for (idx, line) in text.lines().enumerate() {
            let Some((name, raw_value)) = parse_define(line, define_prefix) else {
                trace!("constants:{} skipped", idx + 1);
                continue;
            };

            // digits are all hex here, so any parse failure is overflow
            let code = u8::from_str_radix(hex_digits(raw_value), 16).map_err(|_| {
                ScanForgeError::InvalidConstant {
                    name: name.to_string(),
                    value: raw_value.to_string(),
                }
            })?;

            if let Some(prev) = codes.insert(name.to_string(), code) {
                if prev != code {
                    warn!(
                        "Constant '{}' redefined on line {}: 0x{:02X} -> 0x{:02X}",
                        name,
                        idx + 1,
                        prev,
                        code
                    );
                }
            }
        }

        Ok(Self { codes })
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.codes.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<(String, u8)> for ConstantTable {
    fn from_iter<I: IntoIterator<Item = (String, u8)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

/// `(name, raw value)` of a `#define <prefix>NAME <hex>` line.
fn parse_define<'a>(line: &'a str, define_prefix: &str) -> Option<(&'a str, &'a str)> {
    let line = match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = line.split_whitespace();
    if tokens.next()? != "#define" {
        return None;
    }
    let full_name = tokens.next()?;
    let raw_value = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    let name = full_name.strip_prefix(define_prefix)?;
    if name.is_empty() {
        return None;
    }

    let digits = hex_digits(raw_value);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    Some((name, raw_value))
}

fn hex_digits(raw: &str) -> &str {
    raw.strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_and_trailing_comment() {
        let got = parse_define("#define KBD_EVENT_ESC   0x01 // first row", "KBD_EVENT_");
        assert_eq!(got, Some(("ESC", "0x01")));
    }

    #[test]
    fn ignores_other_defines_and_guards() {
        assert_eq!(parse_define("#define __KBD_CONSTANTS_H", "KBD_EVENT_"), None);
        assert_eq!(parse_define("#define OTHER_ESC 0x01", "KBD_EVENT_"), None);
        assert_eq!(parse_define("#define KBD_EVENT_X zz", "KBD_EVENT_"), None);
        assert_eq!(parse_define("#define KBD_EVENT_X 0x", "KBD_EVENT_"), None);
    }

    #[test]
    fn empty_prefix_accepts_every_define() {
        assert_eq!(parse_define("#define ESC 1b", ""), Some(("ESC", "1b")));
    }
}
