use crate::error::ScrapeError;
use crate::model::{Record, RecordKind};

mod item;
mod recipe;
mod tokens;

pub use self::item::{parse_item_tooltip, ItemTooltipParser};
pub use self::recipe::{parse_profession_row, RecipeRowParser};
pub use self::tokens::{parse_quantity, parse_value, strip_item_link};

/// Turns the raw wikitext of one page into a record
pub trait RecordParser {
    fn kind(&self) -> RecordKind;
    fn parse(&self, raw: &str) -> Result<Record, ScrapeError>;
}

/// Parser for records of the given kind
pub fn parser_for(kind: RecordKind) -> &'static dyn RecordParser {
    match kind {
        RecordKind::Recipe => &RecipeRowParser,
        RecordKind::Item => &ItemTooltipParser,
    }
}
