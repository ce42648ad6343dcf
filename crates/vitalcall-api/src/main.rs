use std::env;
use std::sync::Arc;

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;
use vitalcall_api::config::AppConfig;
use vitalcall_api::state::AppState;
use vitalcall_bedrock::BedrockSummarizer;
use vitalcall_core::ports::{CallRecordStore, Dispatcher, ReadingStore};
use vitalcall_orchestrator::Orchestrator;
use vitalcall_risk::thresholds::Thresholds;
use vitalcall_storage::calls::{InMemoryCallRecordStore, S3CallRecordStore};
use vitalcall_storage::readings::{InMemoryReadingStore, S3ReadingStore};
use vitalcall_telephony::{StubDispatcher, TwilioDispatcher};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A missing .env is normal in deployed environments.
    let _ = dotenvy::dotenv();

    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = AppConfig::from_env();
    let orchestrator = build_orchestrator(&config).await?;
    let app = vitalcall_api::router(AppState::new(orchestrator));

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        tracing::info!("starting under the Lambda runtime");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .wrap_err_with(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_orchestrator(config: &AppConfig) -> eyre::Result<Orchestrator> {
    let thresholds = match &config.thresholds_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading thresholds from {}", path.display()))?;
            Thresholds::from_json(&json)?
        }
        None => Thresholds::default(),
    };

    let (readings, records): (Arc<dyn ReadingStore>, Arc<dyn CallRecordStore>) =
        match &config.bucket {
            Some(bucket) => {
                let s3 = vitalcall_storage::client::build_client().await;
                tracing::info!(bucket = %bucket, "using S3 storage");
                let readings = S3ReadingStore::new(s3.clone(), bucket.clone());
                let records = S3CallRecordStore::new(s3, bucket.clone());
                (
                    Arc::new(readings) as Arc<dyn ReadingStore>,
                    Arc::new(records) as Arc<dyn CallRecordStore>,
                )
            }
            None => {
                let readings = match &config.readings_file {
                    Some(path) => {
                        let bytes = std::fs::read(path)
                            .wrap_err_with(|| format!("reading {}", path.display()))?;
                        InMemoryReadingStore::from_json(&bytes)?
                    }
                    None => InMemoryReadingStore::new(),
                };
                tracing::info!(
                    patients = readings.patient_count().await,
                    "using in-memory storage"
                );
                (
                    Arc::new(readings) as Arc<dyn ReadingStore>,
                    Arc::new(InMemoryCallRecordStore::new()) as Arc<dyn CallRecordStore>,
                )
            }
        };

    let bedrock = vitalcall_bedrock::client::build_client(config.region.clone()).await;
    let summarizer = Arc::new(BedrockSummarizer::new(bedrock, config.model_id.clone()));

    let stub: Arc<dyn Dispatcher> = Arc::new(StubDispatcher::new());
    let mut orchestrator = match &config.twilio {
        Ok(twilio) => {
            let dispatcher = Arc::new(TwilioDispatcher::new(twilio.clone()));
            Orchestrator::new(readings, records, summarizer, dispatcher)
        }
        Err(missing) => {
            tracing::warn!(missing = %missing, "Twilio not configured, placing stub calls");
            Orchestrator::new(readings, records, summarizer, stub.clone())
        }
    };
    if config.twilio.is_ok() && config.stub_fallback {
        orchestrator = orchestrator.with_fallback(stub);
    }

    tracing::info!(
        model = %config.model_id,
        dispatcher = orchestrator.dispatcher_name(),
        "orchestrator ready"
    );
    Ok(orchestrator.with_thresholds(thresholds))
}
