//! ZMesh 命令行入口
//! 读取 DXF 文件，生成节点/杆件/板表格（文本或 zip）

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use zmesh_file::{convert, ConversionRequest, FileError, OutputMode};

mod config;

use config::AppConfig;

/// DXF → 有限元节点/杆件/板表格
#[derive(Debug, Parser)]
#[command(name = "zmesh", version, about)]
struct Cli {
    /// 输入的 DXF 文件（2007 及以上版本）
    input: PathBuf,

    /// 面颜色为 ByLayer 时的默认厚度（颜色号单位，输出为 g/100）
    #[arg(short = 'g', long)]
    thickness: Option<f64>,

    /// 每张表单独成文件并打包为 zip
    #[arg(long)]
    archive: bool,

    /// 输出目录，默认为输入文件所在目录
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 日志等级或 EnvFilter 指令，覆盖配置
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "转换失败");
            match err.downcast_ref::<FileError>() {
                Some(file_err) => eprintln!("{}", file_err.user_message()),
                None => eprintln!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = load_configuration(cli.config.as_deref())?;
    init_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    let default_thickness = resolve_thickness(cli.thickness, &config)?;
    let mode = if cli.archive {
        OutputMode::Archive
    } else {
        config.conversion.mode
    };

    let filename = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("无效的输入路径: {}", cli.input.display()))?;
    let bytes =
        fs::read(&cli.input).with_context(|| format!("读取 {} 失败", cli.input.display()))?;
    info!(input = %cli.input.display(), size = bytes.len(), "开始转换");

    let request = ConversionRequest {
        filename: &filename,
        bytes: &bytes,
        default_thickness,
        mode,
    };
    let conversion = convert(&request, &config.convert_options())?;

    let output_dir = output_dir(&cli.input, cli.output_dir.as_deref());
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("创建输出目录 {} 失败", output_dir.display()))?;
    let output_path = output_dir.join(&conversion.output.name);
    fs::write(&output_path, &conversion.output.bytes)
        .with_context(|| format!("写入 {} 失败", output_path.display()))?;

    Ok(format!(
        "{}: {} węzłów, {} prętów, {} płyt",
        output_path.display(),
        conversion.nodes,
        conversion.bars,
        conversion.plates
    ))
}

/// 显式指定的配置文件必须可读；自动发现失败时退回默认配置
fn load_configuration(override_path: Option<&Path>) -> Result<AppConfig> {
    match override_path {
        Some(path) => Ok(AppConfig::from_file(path)?),
        None => Ok(AppConfig::discover().unwrap_or_else(|err| {
            eprintln!("加载默认配置失败，使用内建默认值: {err}");
            AppConfig::default()
        })),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}

fn resolve_thickness(cli: Option<f64>, config: &AppConfig) -> Result<f64> {
    let thickness = match cli.or(config.conversion.default_thickness) {
        Some(value) => value,
        None => bail!("缺少默认厚度：使用 -g 指定，或在配置中设置 conversion.default_thickness"),
    };
    if !thickness.is_finite() {
        bail!("默认厚度必须是有限数值: {thickness}");
    }
    if thickness < 0.0 {
        warn!(thickness, "默认厚度为负值");
    }
    Ok(thickness)
}

fn output_dir(input: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    }
}
