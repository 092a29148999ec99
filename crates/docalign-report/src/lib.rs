//! Output generation for aligned documents.
//!
//! - **aligned.txt**: `key : value` lines in template order
//! - **raw_ocr.txt**: the OCR lines the alignment ran on
//! - **results.csv**: one row per document across a batch

#![deny(unsafe_code)]

mod outputs;
mod table;

pub use outputs::{
    ALIGNED_FILE_NAME, DocumentOutputs, RAW_OCR_FILE_NAME, render_aligned, write_document_outputs,
};
pub use table::{
    FILE_NAME_COLUMN, KEY_COLUMN_SUFFIX, REPORT_FILE_NAME, ReportTable, append_report_row,
    read_report,
};
