use clap::Parser;

/// Manual test client: sends one image-grounded chat turn to a worker and
/// streams the generated text to the console.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Controller address used to discover a worker for the model.
    #[arg(long, default_value = "http://localhost:21001")]
    pub controller_address: String,

    /// Talk to this worker directly, skipping controller discovery.
    #[arg(long)]
    pub worker_address: Option<String>,

    /// Model to request generation from.
    #[arg(long, default_value = "facebook/opt-350m")]
    pub model_name: String,

    #[arg(long, default_value_t = 256)]
    pub max_new_tokens: usize,

    /// User message sent as the single conversation turn.
    #[arg(long, default_value = "Tell me a story with more than 1000 words.")]
    pub message: String,

    /// Image file to attach to the request. May be repeated.
    #[arg(long = "image", default_value = "images/chest_x_ray_coronal.png")]
    pub images: Vec<String>,

    /// Conversation template used to format the prompt.
    #[arg(long, default_value = "mistral_instruct")]
    pub template: String,
}
