use std::fs;
use std::path::PathBuf;

use sensor_chart::api::{AxisSide, ChartConfig, LoadOutcome, SensorChart, SessionState};
use sensor_chart::core::{Extents, Viewport};
use sensor_chart::ingest::{Data, LocalFile, SensorKind};
use sensor_chart::interaction::ZoomTransform;
use sensor_chart::render::NullRenderer;
use serde::Serialize;

const USAGE: &str = "usage: sensor_chart_inspect --input <path> [--config <path>] [--width <px> --height <px>] [--output <path>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    viewport: Option<Viewport>,
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    file: String,
    readings: usize,
    sensors: Vec<SensorReport>,
    session: Option<SessionReport>,
}

#[derive(Debug, Serialize)]
struct SensorReport {
    token: String,
    kind: SensorKind,
    signals: Vec<SignalReport>,
}

#[derive(Debug, Serialize)]
struct SignalReport {
    name: String,
    readings: usize,
    extents: Option<Extents>,
}

#[derive(Debug, Serialize)]
struct SessionReport {
    state: SessionState,
    transform: ZoomTransform,
    x_domain: (f64, f64),
    axes: Vec<AxisReport>,
    frame_paths: usize,
    frame_texts: usize,
}

#[derive(Debug, Serialize)]
struct AxisReport {
    sensor: String,
    side: AxisSide,
    y_domain: (f64, f64),
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = sensor_chart::telemetry::init_tracing_with_default_filter("warn");
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            ChartConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartConfig::default(),
    };

    let mut chart =
        SensorChart::new(NullRenderer::default(), config).map_err(|err| err.to_string())?;
    if let Some(viewport) = args.viewport {
        chart
            .set_viewport(viewport)
            .map_err(|err| err.to_string())?;
    }

    // The CLI names its input explicitly, so the extension guess is bypassed.
    let file = LocalFile::with_mime(&args.input, chart.config().accepted_mime.clone());
    match chart.load_file(&file).map_err(|err| err.to_string())? {
        LoadOutcome::Loaded { .. } => {}
        other => return Err(format!("input was not loaded: {other:?}")),
    }

    let data = chart
        .data()
        .ok_or_else(|| "no data after load".to_owned())?;
    let session = match chart.session() {
        Some(_) => {
            chart.render().map_err(|err| err.to_string())?;
            session_report(&chart)
        }
        None => None,
    };

    let report = InspectReport {
        file: args.input.display().to_string(),
        readings: data.reading_count(),
        sensors: sensor_reports(&data),
        session,
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("failed to serialize report: {err}"))?;

    match &args.output {
        Some(path) => fs::write(path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn sensor_reports(data: &Data) -> Vec<SensorReport> {
    data.sensors()
        .map(|sensor| SensorReport {
            token: sensor.token().to_owned(),
            kind: sensor.kind(),
            signals: sensor
                .signals()
                .iter()
                .map(|signal| SignalReport {
                    name: signal.name().to_owned(),
                    readings: signal.len(),
                    extents: signal.extents(),
                })
                .collect(),
        })
        .collect()
}

fn session_report(chart: &SensorChart<NullRenderer>) -> Option<SessionReport> {
    let session = chart.session()?;
    let frame = chart.renderer().last_frame.as_ref()?;
    Some(SessionReport {
        state: session.state(),
        transform: session.transform(),
        x_domain: session.x_scale().domain(),
        axes: session
            .axes()
            .iter()
            .filter_map(|axis| {
                let scale = session.y_scale(&axis.sensor)?;
                Some(AxisReport {
                    sensor: axis.sensor.clone(),
                    side: axis.side,
                    y_domain: scale.domain(),
                })
            })
            .collect(),
        frame_paths: frame.paths.len(),
        frame_texts: frame.texts.len(),
    })
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut config = None;
    let mut output = None;
    let mut width = None;
    let mut height = None;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--width" => width = Some(parse_px(args.next(), "--width")?),
            "--height" => height = Some(parse_px(args.next(), "--height")?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let viewport = match (width, height) {
        (Some(width), Some(height)) => Some(Viewport::new(width, height)),
        (None, None) => None,
        _ => return Err("--width and --height must be given together".to_owned()),
    };
    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    Ok(CliArgs {
        input,
        config,
        viewport,
        output,
    })
}

fn parse_px(value: Option<String>, flag: &str) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value `{value}` for {flag}"))
}
