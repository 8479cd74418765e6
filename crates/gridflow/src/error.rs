use std::fmt;

/// Construction-time validation failure.
///
/// Mutators never return this: a rejected move/resize/remove hands back the unchanged layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid {field}")]
    InvalidInput { field: Field },
}

impl Error {
    pub fn invalid(field: Field) -> Self {
        Self::InvalidInput { field }
    }

    pub fn field(&self) -> Field {
        match self {
            Self::InvalidInput { field } => *field,
        }
    }
}

/// The input field whose constraint was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ItemId,
    ItemStartColumn,
    ItemStartRow,
    ItemFilledColumns,
    ItemFilledRows,
    ItemMinFilledColumns,
    ItemMinFilledRows,
    ItemMaxFilledColumns,
    ItemMaxFilledRows,
    LayoutSliceHeight,
    LayoutSliceWidth,
    LayoutGap,
    LayoutTotalColumns,
    LayoutTotalRows,
    LayoutAvailableWidth,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemId => "item id",
            Self::ItemStartColumn => "item start column",
            Self::ItemStartRow => "item start row",
            Self::ItemFilledColumns => "item filled columns",
            Self::ItemFilledRows => "item filled rows",
            Self::ItemMinFilledColumns => "item min filled columns",
            Self::ItemMinFilledRows => "item min filled rows",
            Self::ItemMaxFilledColumns => "item max filled columns",
            Self::ItemMaxFilledRows => "item max filled rows",
            Self::LayoutSliceHeight => "layout slice height",
            Self::LayoutSliceWidth => "layout slice width",
            Self::LayoutGap => "layout gap",
            Self::LayoutTotalColumns => "layout total columns",
            Self::LayoutTotalRows => "layout total rows",
            Self::LayoutAvailableWidth => "layout available width",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn ensure_positive_count(value: u32, field: Field) -> Result<()> {
    if value == 0 {
        return Err(Error::invalid(field));
    }
    Ok(())
}

pub(crate) fn ensure_positive_length(value: f64, field: Field) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::invalid(field));
    }
    Ok(())
}
