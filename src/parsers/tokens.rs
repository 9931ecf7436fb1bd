use crate::error::ScrapeError;
use crate::model::Quantity;
use crate::wikitext;

const ITEM_LINK: &str = "itemlink";
const CURRENCY_MARKERS: &[&str] = &["{{silver}}", "{{copper}}"];

/// Replaces `{{itemlink|Name|*}}` macros with the bare item name.
///
/// ```
/// use profession_scraper::parsers::strip_item_link;
///
/// assert_eq!(
///     strip_item_link("6x {{itemlink|Wild Mint|*}}, 3x {{itemlink|Honey|*}}"),
///     "6x Wild Mint, 3x Honey"
/// );
/// ```
pub fn strip_item_link(s: &str) -> String {
    let mut stripped = String::with_capacity(s.len());
    let mut copied_to = 0;

    for template in wikitext::templates(s) {
        // nested links are handled by the recursion below
        if template.span.start < copied_to || !template.name.eq_ignore_ascii_case(ITEM_LINK) {
            continue;
        }
        stripped.push_str(&s[copied_to..template.span.start]);
        if let Some(name) = template.first_positional() {
            stripped.push_str(strip_item_link(&name.value).trim());
        }
        copied_to = template.span.end;
    }

    stripped.push_str(&s[copied_to..]);
    stripped
}

/// Parses `6x {{itemlink|Wild Mint|*}}` into a quantity and an item name.
///
/// Without an `Nx` prefix the quantity is 1 and the whole text names the item.
pub fn parse_quantity(s: &str) -> Result<Quantity, ScrapeError> {
    let s = s.trim();
    let (quantity, item) = match s.split_once(char::is_whitespace) {
        Some((prefix, rest)) => match quantity_prefix(prefix)? {
            Some(quantity) => (quantity, rest),
            None => (1, s),
        },
        None => (1, s),
    };

    Ok(Quantity {
        quantity,
        item: strip_item_link(item).trim().to_string(),
    })
}

/// `Some(n)` for a `<digits>x` token, `None` for a token that is part of the item name
fn quantity_prefix(token: &str) -> Result<Option<u32>, ScrapeError> {
    let digits = match token.strip_suffix(['x', 'X']) {
        Some(digits) if digits.starts_with(|c: char| c.is_ascii_digit()) => digits,
        _ => return Ok(None),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScrapeError::MalformedQuantity(token.to_string()));
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| ScrapeError::MalformedQuantity(token.to_string()))
}

/// Extracts a currency value as total copper.
///
/// The `{{silver}}` and `{{copper}}` markers and all whitespace are removed
/// and what is left is read as one number, so `{{silver}}1 {{copper}}88` is
/// 188. The digits are joined, not multiplied out.
///
/// The joined number must fit a `u64`; a longer run of digits is reported as
/// `MalformedCurrency`.
pub fn parse_value(raw: &str) -> Result<u64, ScrapeError> {
    let mut residue = String::with_capacity(raw.len());
    let mut rest = raw;

    'scan: while let Some(c) = rest.chars().next() {
        for marker in CURRENCY_MARKERS {
            if rest
                .get(..marker.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(marker))
            {
                rest = &rest[marker.len()..];
                continue 'scan;
            }
        }
        if !c.is_whitespace() {
            residue.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    if residue.is_empty() || !residue.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScrapeError::MalformedCurrency(raw.to_string()));
    }
    residue
        .parse()
        .map_err(|_| ScrapeError::MalformedCurrency(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_item_link() {
        assert_eq!(
            strip_item_link("6x {{itemlink|Wild Mint|*}}, 3x {{itemlink|Honey|*}}, 3x {{itemlink|Spring Water|*}}"),
            "6x Wild Mint, 3x Honey, 3x Spring Water"
        );
    }

    #[test]
    fn test_strip_item_link_is_idempotent() {
        let inputs = [
            "1x {{itemlink|Leather Grimoire|*}}",
            "{{ ItemLink | Honey }} and {{copper}}",
            "{{itemlink|{{itemlink|Nested|*}}|*}}",
            "plain text",
            "",
        ];
        for input in inputs {
            let once = strip_item_link(input);
            assert_eq!(strip_item_link(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_strip_item_link_leaves_other_templates() {
        assert_eq!(
            strip_item_link("{{copper}}5 {{itemlink|Honey|*}}!"),
            "{{copper}}5 Honey!"
        );
        assert_eq!(strip_item_link("{{itemlink|Wild Mint"), "{{itemlink|Wild Mint");
    }

    #[test]
    fn test_parse_quantity_with_prefix() {
        let parsed = parse_quantity("1x {{itemlink|Leather Grimoire|*}}").unwrap();
        assert_eq!(parsed.quantity, 1);
        assert_eq!(parsed.item, "Leather Grimoire");

        let parsed = parse_quantity("  12X   {{itemlink|Honey|*}} ").unwrap();
        assert_eq!(parsed.quantity, 12);
        assert_eq!(parsed.item, "Honey");
    }

    #[test]
    fn test_parse_quantity_defaults_to_one() {
        let parsed = parse_quantity("Leather Grimoire").unwrap();
        assert_eq!(parsed.quantity, 1);
        assert_eq!(parsed.item, "Leather Grimoire");

        let parsed = parse_quantity("{{itemlink|Honey|*}}").unwrap();
        assert_eq!(parsed.quantity, 1);
        assert_eq!(parsed.item, "Honey");

        let parsed = parse_quantity("Xylophone x").unwrap();
        assert_eq!(parsed.quantity, 1);
        assert_eq!(parsed.item, "Xylophone x");
    }

    #[test]
    fn test_parse_quantity_needs_whitespace_after_prefix() {
        // a prefix glued to the name is a single token, so it stays in the name
        let parsed = parse_quantity("6x{{itemlink|Honey|*}}").unwrap();
        assert_eq!(parsed.quantity, 1);
        assert_eq!(parsed.item, "6xHoney");
    }

    #[test]
    fn test_parse_quantity_rejects_bad_numbers() {
        assert!(matches!(
            parse_quantity("1.5x Honey"),
            Err(ScrapeError::MalformedQuantity(_))
        ));
        assert!(matches!(
            parse_quantity("99999999999x Honey"),
            Err(ScrapeError::MalformedQuantity(_))
        ));
    }

    #[test]
    fn test_parse_value_copper_only() {
        assert_eq!(parse_value("61").unwrap(), 61);
        assert_eq!(parse_value("{{copper}}61").unwrap(), 61);
    }

    #[test]
    fn test_parse_value_concatenates_silver_and_copper() {
        // 1 silver and 88 copper read as the digits "1" + "88"
        assert_eq!(parse_value("{{silver}}1 {{copper}}88").unwrap(), 188);
        // ... which is why 1 silver 5 copper comes out as 15, not 105
        assert_eq!(parse_value("{{silver}}1 {{copper}}5").unwrap(), 15);
        assert_eq!(parse_value("{{Silver}}2\n").unwrap(), 2);
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert!(matches!(parse_value(""), Err(ScrapeError::MalformedCurrency(_))));
        assert!(matches!(
            parse_value("{{gold}}1"),
            Err(ScrapeError::MalformedCurrency(_))
        ));
        assert!(matches!(
            parse_value("{{copper}}-3"),
            Err(ScrapeError::MalformedCurrency(_))
        ));
    }

    #[test]
    fn test_parse_value_overflow() {
        assert_eq!(parse_value("18446744073709551615").unwrap(), u64::MAX);
        assert!(matches!(
            parse_value("{{silver}}99999999999 {{copper}}99999999999"),
            Err(ScrapeError::MalformedCurrency(_))
        ));
    }
}
