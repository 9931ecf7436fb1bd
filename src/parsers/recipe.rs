use crate::error::ScrapeError;
use crate::model::{FieldValue, Record, RecordKind, TierOutput};
use crate::parsers::{parse_quantity, RecordParser};
use crate::wikitext;
use log::{debug, warn};

const ROW_TEMPLATE: &str = "table row profession";

pub struct RecipeRowParser;

impl RecordParser for RecipeRowParser {
    fn kind(&self) -> RecordKind {
        RecordKind::Recipe
    }

    fn parse(&self, raw: &str) -> Result<Record, ScrapeError> {
        parse_profession_row(raw)
    }
}

/// `tier1`, `tier2`, ...
fn is_tier(name: &str) -> bool {
    name.strip_prefix("tier")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn is_row_template(name: &str) -> bool {
    name.get(..ROW_TEMPLATE.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(ROW_TEMPLATE))
}

/// Parses a `{{Table row profession|...}}` invocation into a recipe record
pub fn parse_profession_row(raw: &str) -> Result<Record, ScrapeError> {
    let row = wikitext::templates(raw)
        .into_iter()
        .find(|template| is_row_template(&template.name))
        .ok_or_else(|| {
            ScrapeError::MalformedTemplate("no 'Table row profession' template found".to_string())
        })?;

    let mut record = Record::new(RecordKind::Recipe);
    let mut produces = Vec::new();
    record.insert("produces", FieldValue::Produces(Vec::new()));

    for arg in &row.arguments {
        let name = arg.trimmed_name();
        let value = arg.value.trim();
        match name {
            "materials" => {
                let materials = wikitext::split_outside_templates(value, ',')
                    .into_iter()
                    .filter(|material| !material.trim().is_empty())
                    .map(parse_quantity)
                    .collect::<Result<Vec<_>, _>>()?;
                record.insert(name, FieldValue::Materials(materials));
            }
            tier if is_tier(tier) => {
                if value.is_empty() {
                    debug!("Skipping empty {} in {}", tier, row.name);
                    continue;
                }
                let output = parse_quantity(value)?;
                produces.push(TierOutput {
                    tier: tier.to_string(),
                    quantity: output.quantity,
                    item: output.item,
                });
            }
            "link" => {
                let profession = value.split('/').next().unwrap_or_default().trim();
                record.insert("profession", profession);
            }
            "type" => warn!("Dropping 'type' argument of recipe row: {:?}", value),
            _ => record.insert(name, value),
        }
    }

    // keeps the slot reserved above, right after `type`
    record.insert("produces", FieldValue::Produces(produces));
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tier() {
        assert!(is_tier("tier1"));
        assert!(is_tier("tier12"));
        assert!(!is_tier("tier"));
        assert!(!is_tier("tiered"));
        assert!(!is_tier("Tier1"));
    }

    #[test]
    fn test_row_template_name_is_case_insensitive() {
        let record = parse_profession_row("{{table Row Profession|name=Honey}}").unwrap();
        assert_eq!(record.text("name"), Some("Honey"));
        assert!(is_row_template("Table row profession/Alt"));
        assert!(!is_row_template("Table header profession"));
    }

    #[test]
    fn test_missing_row_template() {
        let result = parse_profession_row("{{Table header profession}}");
        assert!(matches!(result, Err(ScrapeError::MalformedTemplate(_))));
        assert!(matches!(
            parse_profession_row("no templates here"),
            Err(ScrapeError::MalformedTemplate(_))
        ));
    }

    #[test]
    fn test_produces_is_always_present() {
        let record = parse_profession_row("{{Table row profession|tier1=|name=X}}").unwrap();
        assert_eq!(record.get("produces"), Some(&FieldValue::Produces(vec![])));
        assert!(!record.contains("tier1"));
    }

    #[test]
    fn test_link_without_slash() {
        let record = parse_profession_row("{{Table row profession|link= Alchemy }}").unwrap();
        assert_eq!(record.text("profession"), Some("Alchemy"));
        assert!(!record.contains("link"));
    }

    #[test]
    fn test_type_argument_is_dropped() {
        let record = parse_profession_row("{{Table row profession|type=potion}}").unwrap();
        assert!(!record.contains("type"));
        let line = record.to_json_line().unwrap();
        assert!(line.starts_with(r#"{"type":"recipe""#));
    }

    #[test]
    fn test_comma_inside_item_name() {
        let record = parse_profession_row(
            "{{Table row profession|materials=2x {{itemlink|Potion, Greater|*}}, 1x {{itemlink|Honey|*}}}}",
        )
        .unwrap();
        let line = record.to_json_line().unwrap();
        assert!(line.contains(
            r#""materials":[{"quantity":2,"item":"Potion, Greater"},{"quantity":1,"item":"Honey"}]"#
        ));
    }

    #[test]
    fn test_bad_material_quantity_fails() {
        let result = parse_profession_row("{{Table row profession|materials=2.5x {{itemlink|Honey|*}}}}");
        assert!(matches!(result, Err(ScrapeError::MalformedQuantity(_))));
    }
}
