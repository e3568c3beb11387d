//! 批处理报表服务 - 业务能力层
//!
//! 把一次批量分析的结果投影成表格行，并序列化为可下载的 xlsx 字节。
//! 本模块只生成字节缓冲区，落盘由调用方决定。

use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;
use crate::models::{Outcome, OutcomeStatus, WorkItem};

/// 工作表名称
pub const SHEET_NAME: &str = "AnalysisResults";

/// 表头（与原始导出格式一致）
pub const HEADERS: [&str; 5] = ["文件名", "状态", "消息", "分析结果", "错误详情"];

/// 报表的一行：文件名 + 该文件的处理结果
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub file_name: String,
    pub status: OutcomeStatus,
    pub message: String,
    pub result: Option<String>,
    pub error_details: Option<String>,
}

/// 把输入文件列表和结果列表投影成报表行
///
/// 前置条件：两个列表按索引对齐且等长，长度不一致属于调用方的
/// 编程错误，立即失败而不是静默截断。
pub fn build_rows(items: &[WorkItem], results: &[Outcome]) -> Result<Vec<ReportRow>, ReportError> {
    if items.len() != results.len() {
        return Err(ReportError::LengthMismatch {
            items: items.len(),
            results: results.len(),
        });
    }

    let rows = items
        .iter()
        .zip(results.iter())
        .map(|(item, outcome)| ReportRow {
            file_name: item.file_name.clone(),
            status: outcome.status,
            message: outcome.message.clone(),
            result: outcome.result.clone(),
            error_details: outcome.error_details.clone(),
        })
        .collect();

    Ok(rows)
}

/// 把报表行序列化为 xlsx 字节
///
/// 单个工作表，首行为表头，每个文件一行，顺序与输入一致。
pub fn write_workbook(rows: &[ReportRow]) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, title) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        worksheet.write_string(r, 0, &row.file_name)?;
        worksheet.write_string(r, 1, row.status.as_str())?;
        worksheet.write_string(r, 2, &row.message)?;
        worksheet.write_string(r, 3, row.result.as_deref().unwrap_or(""))?;
        worksheet.write_string(r, 4, row.error_details.as_deref().unwrap_or(""))?;
    }

    let buffer = workbook.save_to_buffer()?;
    debug!("报表序列化完成: {} 行, {} 字节", rows.len(), buffer.len());

    Ok(buffer)
}

/// 生成完整报表：表格行 + xlsx 字节
pub fn build_report(
    items: &[WorkItem],
    results: &[Outcome],
) -> Result<(Vec<ReportRow>, Vec<u8>), ReportError> {
    let rows = build_rows(items, results)?;
    let bytes = write_workbook(&rows)?;
    Ok((rows, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn sample_items() -> Vec<WorkItem> {
        vec![
            WorkItem::new("一.mp3", vec![1, 2, 3], "audio/mpeg"),
            WorkItem::new("二.wav", vec![4, 5], "audio/wav"),
            WorkItem::new("三.mp3", vec![6], "audio/mpeg"),
        ]
    }

    fn sample_results() -> Vec<Outcome> {
        vec![
            Outcome::from_analysis(Ok("一段轻快的吉他独奏".to_string())),
            Outcome::from_analysis(Err(AnalyzeError::Blocked {
                detail: "SAFETY".to_string(),
            })),
            Outcome::from_analysis(Err(AnalyzeError::EmptyResponse {
                model: "gemini-2.5-flash".to_string(),
            })),
        ]
    }

    /// 把 xlsx 字节读回为字符串表格
    fn read_back(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).expect("应该能打开 xlsx");
        let range = workbook
            .worksheet_range(SHEET_NAME)
            .expect("应该存在 AnalysisResults 工作表");
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::String(s) => s.clone(),
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_build_rows_preserves_order_and_count() {
        let items = sample_items();
        let results = sample_results();

        let rows = build_rows(&items, &results).unwrap();

        assert_eq!(rows.len(), items.len());
        assert_eq!(rows[0].file_name, "一.mp3");
        assert_eq!(rows[0].status, OutcomeStatus::Succeeded);
        assert_eq!(rows[1].file_name, "二.wav");
        assert_eq!(rows[1].status, OutcomeStatus::Blocked);
        assert_eq!(rows[2].status, OutcomeStatus::Failed);
    }

    #[test]
    fn test_build_rows_length_mismatch_fails_fast() {
        let items = sample_items();
        let results = &sample_results()[..2];

        let err = build_rows(&items, results).unwrap_err();
        assert!(matches!(
            err,
            ReportError::LengthMismatch {
                items: 3,
                results: 2
            }
        ));
    }

    #[test]
    fn test_xlsx_round_trip() {
        let items = sample_items();
        let results = sample_results();

        let (rows, bytes) = build_report(&items, &results).unwrap();
        let table = read_back(bytes);

        // 表头 + 每个文件一行
        assert_eq!(table.len(), rows.len() + 1);
        assert_eq!(table[0], HEADERS.to_vec());

        for (row, cells) in rows.iter().zip(table.iter().skip(1)) {
            assert_eq!(cells[0], row.file_name);
            assert_eq!(cells[1], row.status.as_str());
            assert_eq!(cells[2], row.message);
            assert_eq!(cells[3], row.result.clone().unwrap_or_default());
            assert_eq!(cells[4], row.error_details.clone().unwrap_or_default());
        }
    }

    #[test]
    fn test_empty_batch_produces_header_only() {
        let (rows, bytes) = build_report(&[], &[]).unwrap();
        assert!(rows.is_empty());

        let table = read_back(bytes);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0], HEADERS.to_vec());
    }
}
