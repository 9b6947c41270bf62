//! Metadata extraction from exported workbooks.
//!
//! The first sheet carries the row labels `TITLE`, `DESCRIPTION` and
//! `SHORT_DESCRIPTION` in column 0 and one column per locale. Row 0 holds the
//! locale header; when a header cell spans two rows, row 0 is empty and the
//! header text sits in row 1. All positions are absolute sheet coordinates.

use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::error::{Error, Result};
use crate::model::config::strip_whitespace;
use crate::model::metadata::{AppMetadata, DESCRIPTION_KEY, SHORT_DESCRIPTION_KEY, TITLE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub title: u32,
    pub description: u32,
    pub short_description: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// Row 0 has a value (whitespace removed).
    Code(String),
    /// Row 0 is empty, row 1 has a value (whitespace removed).
    Continuation(String),
    Empty,
}

pub fn open_first_sheet(path: &Path) -> Result<Range<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet = workbook.worksheet_range_at(0).ok_or(Error::EmptyWorkbook)??;
    Ok(sheet)
}

fn cell(sheet: &Range<Data>, row: u32, col: u32) -> String {
    sheet
        .get_value((row, col))
        .map(|d| d.to_string())
        .unwrap_or_default()
}

fn last_row(sheet: &Range<Data>) -> Option<u32> {
    sheet.end().map(|(row, _)| row)
}

pub fn last_column(sheet: &Range<Data>) -> Option<u32> {
    sheet.end().map(|(_, col)| col)
}

pub fn locate_rows(sheet: &Range<Data>) -> Result<RowLayout> {
    let mut title = None;
    let mut description = None;
    let mut short_description = None;

    if let Some(last) = last_row(sheet) {
        for row in 0..=last {
            let label = cell(sheet, row, 0);
            let slot = match label.trim() {
                TITLE_KEY => &mut title,
                DESCRIPTION_KEY => &mut description,
                SHORT_DESCRIPTION_KEY => &mut short_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(row);
            }
        }
    }

    Ok(RowLayout {
        title: title.ok_or(Error::MissingRowLabel(TITLE_KEY))?,
        description: description.ok_or(Error::MissingRowLabel(DESCRIPTION_KEY))?,
        short_description: short_description
            .ok_or(Error::MissingRowLabel(SHORT_DESCRIPTION_KEY))?,
    })
}

pub fn header(sheet: &Range<Data>, col: u32) -> Header {
    let first = strip_whitespace(&cell(sheet, 0, col));
    if !first.is_empty() {
        return Header::Code(first);
    }

    let second = strip_whitespace(&cell(sheet, 1, col));
    if second.is_empty() {
        Header::Empty
    } else {
        Header::Continuation(second)
    }
}

/// First column (after the label column) whose header is `target`, or whose
/// header continues from a two-row cell.
pub fn find_locale_column(sheet: &Range<Data>, target: &str) -> Option<u32> {
    let last = last_column(sheet)?;
    (1..=last).find(|&col| match header(sheet, col) {
        Header::Code(code) => code == target,
        Header::Continuation(_) => true,
        Header::Empty => false,
    })
}

pub fn read_column(sheet: &Range<Data>, rows: RowLayout, col: u32) -> AppMetadata {
    AppMetadata {
        title: cell(sheet, rows.title, col),
        short_description: cell(sheet, rows.short_description, col),
        full_description: cell(sheet, rows.description, col),
    }
}
