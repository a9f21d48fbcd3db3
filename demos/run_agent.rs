use std::sync::Arc;

use rusplan::{
    input::UserTaskInput,
    llm::OpenAiChatService,
    runner::{AgentRunner, RunOutput, RunnerOptions},
    tools::default_registry,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    println!("🚀 开始完整的规划-执行流程...");

    // 需要 OPENAI_API_KEY / OPENAI_MODEL，OPENAI_BASE_URL 可选
    let service = match OpenAiChatService::from_env() {
        Ok(service) => service,
        Err(e) => {
            println!("❌ LLM 配置缺失: {}", e);
            return;
        }
    };

    let registry = Arc::new(default_registry());
    let runner = AgentRunner::new(Arc::new(service), registry)
        .with_options(RunnerOptions::default().with_known_tools_check(true));

    let input = UserTaskInput::default();
    println!("📋 用户任务: {}", input.goal);

    match runner.run_once(&input).await {
        Ok(RunOutput::Digest(digest)) => {
            println!("🎉 任务完成: {:?}", digest.task_status);
            println!("{}", serde_json::to_string_pretty(&digest).unwrap());
        }
        Ok(RunOutput::Full(report)) => {
            println!("📄 返回完整报告（debug 或未完成状态）:");
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        Err(e) => println!("❌ 运行失败: {}", e),
    }
}
