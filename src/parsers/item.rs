use crate::error::ScrapeError;
use crate::model::{FieldValue, Record, RecordKind};
use crate::parsers::{parse_value, RecordParser};
use crate::wikitext;
use log::warn;

pub struct ItemTooltipParser;

impl RecordParser for ItemTooltipParser {
    fn kind(&self) -> RecordKind {
        RecordKind::Item
    }

    fn parse(&self, raw: &str) -> Result<Record, ScrapeError> {
        parse_item_tooltip(raw)
    }
}

/// Parses an item tooltip page into an item record.
///
/// Only the first template of the page is read, whatever its name: tooltip
/// pages pick their template through a parser function.
pub fn parse_item_tooltip(raw: &str) -> Result<Record, ScrapeError> {
    let tooltip = wikitext::templates(raw)
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::MalformedTemplate("no template found".to_string()))?;

    let mut record = Record::new(RecordKind::Item);
    let mut tags = Vec::new();
    record.insert("tags", FieldValue::Tags(Vec::new()));

    for arg in &tooltip.arguments {
        let name = arg.trimmed_name();
        match name {
            tag if tag.starts_with("tag") => tags.push(arg.value.trim().to_string()),
            "value" => record.insert(name, parse_value(&arg.value)?),
            // style argument of the tooltip
            "1" => continue,
            "type" => warn!("Dropping 'type' argument of tooltip: {:?}", arg.value.trim()),
            _ => record.insert(name, arg.value.trim()),
        }
    }

    record.insert("tags", FieldValue::Tags(tags));
    Ok(record)
}
