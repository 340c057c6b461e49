//! Filename metadata parsing.
//!
//! Dataset files follow the convention
//! `{name}_{recordNum}_{startYYMMDDHHmm}_{endYYMMDDHHmm}.ext`, e.g.
//! `walk-17_211_1711051829_1711051833.txt`. The grammar is anchored on the
//! right, so the leading name may contain `_` itself.

use crate::error::{Degraded, Warning};
use chrono::NaiveDateTime;

/// Timestamp layout used inside filenames.
const FILENAME_TIME_FORMAT: &str = "%y%m%d%H%M";
/// Layout of `record_start_date` / `record_end_date`.
pub const RECORD_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";
/// Digits in a filename timestamp.
const TIMESTAMP_DIGITS: usize = 10;
/// Characters cut from the last segment before the end timestamp.
const EXTENSION_WIDTH: usize = 4;

/// Fields encoded in a dataset filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameMetadata {
    pub record_num: Option<i32>,
    pub record_start_date: Option<String>,
    pub record_end_date: Option<String>,
}

/// Parse the metadata fields out of `name`.
///
/// Never fails: each field that does not parse is left `None` and a warning
/// is recorded for it.
pub fn parse_filename(name: &str) -> Degraded<FilenameMetadata> {
    let mut result = Degraded::clean(FilenameMetadata::default());

    // rsplitn walks from the right, so the segments come out as
    // [end.ext, start, recordNum, name].
    let segments: Vec<&str> = name.rsplitn(4, '_').collect();
    if segments.len() < 4 {
        result.warn(Warning::RecordNum { name: name.to_string() });
        result.warn(Warning::StartDate { name: name.to_string() });
        result.warn(Warning::EndDate { name: name.to_string() });
        return result;
    }

    match segments[2].parse::<i32>() {
        Ok(num) => result.value.record_num = Some(num),
        Err(_) => result.warn(Warning::RecordNum { name: name.to_string() }),
    }

    match reformat_timestamp(segments[1]) {
        Some(date) => result.value.record_start_date = Some(date),
        None => result.warn(Warning::StartDate { name: name.to_string() }),
    }

    if !has_short_extension(name) {
        result.warn(Warning::UnexpectedExtension { name: name.to_string() });
    }
    match strip_extension(segments[0]).and_then(reformat_timestamp) {
        Some(date) => result.value.record_end_date = Some(date),
        None => result.warn(Warning::EndDate { name: name.to_string() }),
    }

    result
}

/// `YYMMDDHHmm` to `YYYY/MM/DD HH:mm`. Exactly ten digits are required.
fn reformat_timestamp(raw: &str) -> Option<String> {
    if raw.len() != TIMESTAMP_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, FILENAME_TIME_FORMAT)
        .ok()
        .map(|t| t.format(RECORD_TIME_FORMAT).to_string())
}

/// Drop the trailing `.ext` of the last segment by width, not by dot.
fn strip_extension(segment: &str) -> Option<&str> {
    let chars = segment.chars().count();
    if chars < EXTENSION_WIDTH {
        return None;
    }
    let cut = segment
        .char_indices()
        .nth(chars - EXTENSION_WIDTH)
        .map(|(i, _)| i)
        .unwrap_or(segment.len());
    Some(&segment[..cut])
}

fn has_short_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.chars().count() == EXTENSION_WIDTH - 1)
        .unwrap_or(false)
}
