use crate::command::shared::TokenGenerator;
use crate::error::AppError;
use async_trait::async_trait;
use domain::job::{GenerateParams, JobRepository, JobState};
use domain::value::{ImageRef, JobId};
use log::{error, info, warn};
use std::sync::Arc;
use tokio;

/// One image descriptor as returned by the upstream API: either the image
/// bytes inline (base64) or a URL the upstream hosts itself.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamImage {
    Base64(String),
    Url(String),
}

// 上游文生图客户端接口
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, params: &GenerateParams) -> Result<Vec<UpstreamImage>, AppError>;
}

// 图片落盘接口：解码 base64 并持久化，返回相对路径引用
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn persist_base64(&self, data: &str) -> Result<ImageRef, AppError>;
}

pub struct GenerateImagesCmd {
    pub prompt: String,
    pub size: Option<String>,
    pub copies: i64,
}

pub struct GenerationCommandService<R> {
    job_repo: Arc<R>,
    generator: Arc<dyn ImageGenerator>,
    image_store: Arc<dyn ImageStore>,
    token_generator: Arc<dyn TokenGenerator>,
}

impl<R> GenerationCommandService<R>
where
    R: JobRepository + Send + Sync + 'static,
{
    pub fn new(
        job_repo: Arc<R>,
        generator: Arc<dyn ImageGenerator>,
        image_store: Arc<dyn ImageStore>,
        token_generator: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            job_repo,
            generator,
            image_store,
            token_generator,
        }
    }

    /// Validate the command, record the job as processing and schedule the
    /// completion work. Returns without waiting on the upstream call; the
    /// caller polls the repository for the outcome.
    pub async fn submit(&self, cmd: GenerateImagesCmd) -> Result<JobId, AppError> {
        let params = GenerateParams::new(&cmd.prompt, cmd.size, cmd.copies)?;
        let job_id = JobId::from(self.token_generator.next_token().await?);
        self.job_repo.mark_processing(&job_id).await?;
        info!(
            "Generation job {} submitted: {} image(s) at {}",
            job_id,
            params.copies(),
            params.size()
        );

        let job_repo = Arc::clone(&self.job_repo);
        let generator = Arc::clone(&self.generator);
        let image_store = Arc::clone(&self.image_store);
        let id = job_id.clone();
        tokio::spawn(async move {
            // one attempt, no retry; any failure discards the whole batch
            let outcome = match run_generation(generator, image_store, &params).await {
                Ok(references) => {
                    info!("Generation job {} produced {} image(s)", id, references.len());
                    JobState::Succeeded(references)
                }
                Err(e) => {
                    warn!("Generation job {} failed: {}", id, e);
                    JobState::Failed(e.to_string())
                }
            };
            if let Err(e) = job_repo.complete(&id, outcome).await {
                error!("Failed to record outcome for job {}: {}", id, e);
            }
        });

        Ok(job_id)
    }
}

async fn run_generation(
    generator: Arc<dyn ImageGenerator>,
    image_store: Arc<dyn ImageStore>,
    params: &GenerateParams,
) -> Result<Vec<ImageRef>, AppError> {
    let descriptors = generator.generate(params).await?;
    let mut references = Vec::with_capacity(descriptors.len());
    // upstream order is preserved in the recorded list
    for descriptor in descriptors {
        match descriptor {
            UpstreamImage::Base64(data) => {
                references.push(image_store.persist_base64(&data).await?)
            }
            UpstreamImage::Url(url) => references.push(ImageRef::Remote(url)),
        }
    }
    Ok(references)
}
