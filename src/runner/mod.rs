pub mod report;

pub use report::{RunDigest, RunOutput, RunReport};

use std::{fs, path::PathBuf, sync::Arc};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    error::{Result, plan_error::PlanError},
    execution::PlanExecutor,
    input::UserTaskInput,
    llm::CompletionService,
    message::{generate_planner_messages, generate_repair_messages},
    models::Plan,
    tools::ToolRegistry,
    utils::{StripCodeBlock, extract_json_object},
    validator::{ValidateOptions, ValidationReport, validate_outcomes, validate_plan},
};

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub temperature: f32,
    pub max_tokens: u32,

    /// true 时总是返回完整报告。
    pub debug: bool,

    /// 降级依赖视为未满足（传给执行引擎）。
    pub strict_degraded: bool,

    /// 计划必须恰好包含的步骤数。
    pub expected_steps: Option<usize>,

    /// 校验时检查工具名是否已注册。关闭时未知工具留给执行期失败。
    pub known_tools_check: bool,

    /// 终止性解析失败时原始输出的落盘目录。
    pub debug_dir: PathBuf,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 512,
            debug: false,
            strict_degraded: false,
            expected_steps: None,
            known_tools_check: false,
            debug_dir: PathBuf::from("docs-private/_debug"),
        }
    }
}

impl RunnerOptions {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_strict_degraded(mut self, strict: bool) -> Self {
        self.strict_degraded = strict;
        self
    }

    pub fn with_expected_steps(mut self, expected: usize) -> Self {
        self.expected_steps = Some(expected);
        self
    }

    pub fn with_known_tools_check(mut self, check: bool) -> Self {
        self.known_tools_check = check;
        self
    }

    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = dir.into();
        self
    }
}

/// 计划运行器：发起规划调用，解析与校验输出，必要时修复一次，
/// 然后交给执行引擎并整形最终输出。
pub struct AgentRunner {
    service: Arc<dyn CompletionService>,
    registry: Arc<ToolRegistry>,
    options: RunnerOptions,
}

impl AgentRunner {
    pub fn new(service: Arc<dyn CompletionService>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            service,
            registry,
            options: RunnerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    /// 一次完整运行：规划、修复、执行、终检、整形。
    pub async fn run_once(&self, input: &UserTaskInput) -> Result<RunOutput> {
        let messages = generate_planner_messages(input, &self.registry.infos());
        let raw = self
            .service
            .complete(&messages, self.options.temperature, self.options.max_tokens)
            .await?;

        let plan = self.run_with_repair(&raw).await?;

        let executor = PlanExecutor::new(self.registry.clone())
            .with_strict_degraded(self.options.strict_degraded);
        let records = executor.execute(&plan).await;

        for violation in validate_outcomes(&records) {
            error!("Outcome invariant violated: {}", violation);
        }

        let report = RunReport::new(plan, records);
        info!("Run {} finished", report.run_id);
        Ok(RunOutput::finalize(report, self.options.debug))
    }

    /// 解析并校验模型输出；最多发起一次修复回合，绝不嵌套。
    ///
    /// Accepts on the first clean validation. A non-repairable report is
    /// terminal before any repair. After the single repair round the result
    /// is terminal either way.
    pub async fn run_with_repair(&self, raw: &str) -> Result<Plan> {
        if raw.trim().is_empty() {
            return Err(PlanError::EmptyOutput.into());
        }

        let opts = self.validate_options();

        let error_summary = match parse_plan_document(raw) {
            Ok(doc) => {
                let report = ValidationReport::from(validate_plan(&doc, &opts));
                if report.is_empty() {
                    debug!("Plan accepted on first validation");
                    return Ok(serde_json::from_value(doc)?);
                }
                if !report.is_repairable() {
                    return Err(PlanError::ContractViolation(report).into());
                }
                report.to_string()
            }
            Err(parse_err) => format!("输出不是合法 JSON: {parse_err}"),
        };

        info!("Issuing one repair round: {}", error_summary);

        let messages = generate_repair_messages(raw, &error_summary);
        let repaired = self
            .service
            .complete(&messages, self.options.temperature, self.options.max_tokens)
            .await?;

        let doc = match parse_plan_document(&repaired) {
            Ok(doc) => doc,
            Err(parse_err) => {
                let artifact = self.dump_raw_artifact(&repaired);
                return Err(PlanError::MalformedJson {
                    message: parse_err.to_string(),
                    preview: preview(&repaired),
                    artifact,
                }
                .into());
            }
        };

        let report = ValidationReport::from(validate_plan(&doc, &opts));
        if !report.is_empty() {
            return Err(PlanError::RepairRejected(report).into());
        }

        debug!("Plan accepted after repair");
        Ok(serde_json::from_value(doc)?)
    }

    fn validate_options(&self) -> ValidateOptions {
        let mut opts = ValidateOptions::default();
        if let Some(expected) = self.options.expected_steps {
            opts = opts.with_expected_steps(expected);
        }
        if self.options.known_tools_check {
            opts = opts.with_known_tools(self.registry.known_names());
        }
        opts
    }

    /// 落盘失败只告警，不影响错误返回。
    fn dump_raw_artifact(&self, raw: &str) -> Option<PathBuf> {
        let dir = &self.options.debug_dir;
        if let Err(err) = fs::create_dir_all(dir) {
            warn!("Cannot create debug dir {}: {}", dir.display(), err);
            return None;
        }

        let path = dir.join("last_agent_raw.txt");
        match fs::write(&path, raw) {
            Ok(()) => Some(path),
            Err(err) => {
                warn!("Cannot write debug artifact {}: {}", path.display(), err);
                None
            }
        }
    }
}

/// Best-effort document extraction: strip fences, take the outermost brace
/// span, then scan `{` candidates right to left for the first span that
/// parses. The error of the outermost attempt is the one reported.
fn parse_plan_document(raw: &str) -> core::result::Result<Value, serde_json::Error> {
    let text = raw.strip_code_block();
    let candidate = extract_json_object(text);

    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            if let Some(end) = text.rfind('}') {
                let opens: Vec<usize> = text[..end].match_indices('{').map(|(i, _)| i).collect();
                for start in opens.into_iter().rev() {
                    if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                        return Ok(value);
                    }
                }
            }
            Err(first_err)
        }
    }
}

fn preview(raw: &str) -> String {
    raw.chars().take(200).collect::<String>().replace('\n', "\\n")
}
