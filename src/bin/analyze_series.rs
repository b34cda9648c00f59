use log::{debug, error, info, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use trading_analysis::source::JsonFileSource;
use trading_analysis::{
    AnalysisConfig, ConfigFormat, ConfigLoader, ConfigResult, SuggestionEngine, SystemClock,
};

/// 조회 기간 기본값 (일)
const DEFAULT_DAYS: u32 = 30;

fn load_config(path: &Path) -> ConfigResult<AnalysisConfig> {
    ConfigLoader::load_from_file(path, ConfigFormat::Auto)
}

fn main() -> ExitCode {
    // 로그 초기화
    env_logger::init();

    info!("시계열 분석기 시작");
    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    if args.len() < 2 {
        error!("인수가 충분하지 않습니다. 시계열 파일이 필요합니다.");
        println!("사용법: {} <시계열_JSON_파일> [설정_파일_경로] [조회_일수]", args[0]);
        return ExitCode::FAILURE;
    }

    let series_path = PathBuf::from(&args[1]);
    let config = match args.get(2) {
        Some(path) => match load_config(Path::new(path)) {
            Ok(config) => config,
            Err(err) => {
                error!("설정 로드 실패: {}", err);
                println!("설정 로드 실패: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => {
            debug!("기본 설정 사용");
            AnalysisConfig::default()
        }
    };
    let days = match args.get(3).map(|d| d.parse::<u32>()) {
        Some(Ok(days)) => days,
        Some(Err(err)) => {
            warn!("조회 일수 파싱 실패 ({}), 기본값 {}일 사용", err, DEFAULT_DAYS);
            DEFAULT_DAYS
        }
        None => DEFAULT_DAYS,
    };

    // 파일 이름을 심볼로 사용
    let symbol = series_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let dir = series_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let source = JsonFileSource::new(dir);

    let engine = match SuggestionEngine::new(config, SystemClock) {
        Ok(engine) => engine,
        Err(err) => {
            error!("엔진 생성 실패: {}", err);
            println!("엔진 생성 실패: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match engine.analyze_from_source(&source, &symbol, days) {
        Ok(suggestion) => match serde_json::to_string_pretty(&suggestion) {
            Ok(json) => {
                println!("{}", json);
                info!("시계열 분석기 종료");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("결과 직렬화 실패: {}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            error!("분석 실패: {}", err);
            println!("분석 실패: {}", err);
            ExitCode::FAILURE
        }
    }
}
