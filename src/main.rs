use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use quiz_generator::models::{load_source_bytes, load_source_from_stdin};
use quiz_generator::utils::logging::{log_startup, print_final_stats};
use quiz_generator::{logger, Config, LlmClient, QuizFlow, QuizOutput};

/// 从一段原文生成选择题
#[derive(Parser, Debug)]
#[command(name = "quiz-gen", version, about)]
struct Cli {
    /// 原文文件路径，省略或为 "-" 时从标准输入读取
    input: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖模型名称
    #[arg(short, long)]
    model: Option<String>,

    /// 覆盖题目数量上限
    #[arg(long)]
    max_questions: Option<usize>,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置：文件 → 环境变量 → 命令行
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path).await?.with_env_overrides(),
        None => Config::from_env(),
    };
    if let Some(model) = cli.model {
        config.model_name = model;
    }
    if let Some(max_questions) = cli.max_questions {
        config.max_questions = max_questions;
    }
    config.validate()?;

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);
    log_startup(&config.model_name, config.max_questions);

    let bytes = match &cli.input {
        Some(path) if path.to_str() != Some("-") => load_source_bytes(path).await?,
        _ => load_source_from_stdin().await?,
    };

    let flow = QuizFlow::new(LlmClient::new(&config), &config);
    let started = Instant::now();
    let output = flow
        .generate_from_bytes(&bytes)
        .await
        .context("出题失败")?;

    print_final_stats(&output, started.elapsed().as_secs_f64());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_quiz(&output);
    }

    Ok(())
}

/// 按编号打印题目、选项和答案
fn print_quiz(output: &QuizOutput) {
    println!("Total number of questions: {}\n", output.total_questions());

    for (i, question) in output.questions().iter().enumerate() {
        println!("{:-^64}", format!(" QUESTION {} ", i + 1));
        println!("DIFFICULTY: {}", question.difficulty());
        println!("QUESTION: {}", question.question());
        println!("OPTIONS:");
        for (j, option) in question.options().iter().enumerate() {
            println!("{}. {}", j + 1, option);
        }
        println!("ANSWER: {}\n", question.answer());
    }
}
