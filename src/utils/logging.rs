//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::info;

use crate::models::QuizOutput;

/// 记录程序启动信息
///
/// # 参数
/// - `model_name`: 模型名称
/// - `max_questions`: 题目数量上限
pub fn log_startup(model_name: &str, max_questions: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 选择题生成模式");
    info!("🤖 模型: {}", model_name);
    info!("📊 题目上限: {}", max_questions);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `output`: 出题结果
/// - `elapsed_secs`: 耗时（秒）
pub fn print_final_stats(output: &QuizOutput, elapsed_secs: f64) {
    info!("\n{}", "=".repeat(60));
    info!("📊 出题完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 题目数: {}", output.total_questions());
    info!("📄 原文单词数: {}", output.source_text().split_whitespace().count());
    info!("⏱️ 耗时: {:.1} 秒", elapsed_secs);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
