use std::sync::Arc;

use rusplan::{
    execution::PlanExecutor,
    models::Plan,
    tools::default_registry,
    validator::{ValidateOptions, validate_plan},
};
use serde_json::json;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    println!("🚀 离线执行一个手工计划（跳过LLM）...");

    let doc = json!({
        "task_summary": "检索 workflow 笔记并生成要点",
        "assumptions": ["本地语料可用"],
        "risks": ["检索结果可能为空"],
        "steps": [
            {
                "step_id": "step_1",
                "title": "检索笔记",
                "description": "在本地语料中检索 workflow 相关内容",
                "dependencies": [],
                "deliverable": "命中的文档列表",
                "acceptance": "docs 非空",
                "tool": "search_tool",
                "args": {"query": "workflow 可插拔", "top_k": 2}
            },
            {
                "step_id": "step_2",
                "title": "生成要点",
                "description": "把笔记内容压缩成不超过两条要点",
                "dependencies": ["step_1"],
                "deliverable": "要点列表",
                "acceptance": "points 不超过两条",
                "tool": "summarize_tool",
                "args": {
                    "docs": [
                        {"doc_id": "note_1", "content": "今天完成了 workflow skeleton：Input -> Retrieval -> Reasoning -> Output，且每个节点可插拔。"},
                        {"doc_id": "note_2", "content": "retriever/reasoner/renderer 都通过注入策略实现解耦，run 保持稳定，变化集中在策略函数。"}
                    ],
                    "max_points": 2
                }
            },
            {
                "step_id": "step_3",
                "title": "记录时间",
                "description": "记录任务完成时间",
                "dependencies": ["step_2"],
                "deliverable": "UTC 时间戳",
                "acceptance": "now_utc 存在",
                "tool": "get_time"
            }
        ]
    });

    let errors = validate_plan(&doc, &ValidateOptions::default());
    if !errors.is_empty() {
        println!("❌ 计划未通过校验:");
        for error in &errors {
            println!("  - {}", error);
        }
        return;
    }
    println!("✅ 计划通过校验");

    let plan: Plan = serde_json::from_value(doc).unwrap();
    println!("📋 任务: {}，共 {} 个步骤", plan.task_summary, plan.steps.len());

    let registry = Arc::new(default_registry());
    let records = PlanExecutor::new(registry).execute(&plan).await;

    println!("\n📊 执行记录:");
    for record in &records {
        match record.as_step() {
            Some(step) => {
                let icon = if step.ok {
                    "✅"
                } else if step.skipped {
                    "⏭️"
                } else {
                    "❌"
                };
                println!(
                    "  {} {} ({})",
                    icon,
                    step.step_id,
                    step.tool.as_deref().unwrap_or("-")
                );
            }
            None => {
                if let Some(meta) = record.as_meta() {
                    println!(
                        "  🏁 {:?}: {} ok / {} skipped / {} failed",
                        meta.task_status, meta.stats.ok, meta.stats.skipped, meta.stats.failed
                    );
                }
            }
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&records).unwrap());
}
