use anyhow::Result;
use clap::Parser;
use tracing::info;
use vistral_core::{
    conv_template, get_images, normalize_worker_addr, protocol::TEMPERATURE, ClientError,
    ControllerClient, GenerateRequest, ImageReturn, WorkerClient,
};

mod args;
mod printer;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    vistral_core::initialize_logging();

    let args = Args::parse();

    let worker_addr = match &args.worker_address {
        Some(addr) => normalize_worker_addr(addr),
        None => {
            let controller = ControllerClient::new(&args.controller_address);
            controller.resolve_worker(&args.model_name).await?
        }
    };
    // An empty address is a deliberate no-op exit, not an error.
    let Some(worker_addr) = worker_addr else {
        info!("No worker serves `{}`, exiting", args.model_name);
        return Ok(());
    };

    let mut conv = conv_template(&args.template)
        .ok_or_else(|| ClientError::UnknownTemplate(args.template.clone()))?;
    let user_role = conv.roles[0].clone();
    conv.append_message(user_role, Some(args.message.clone()));
    let prompt = conv.get_prompt();

    let images = get_images(&args.images, ImageReturn::Base64Png)?
        .iter()
        .filter_map(|image| image.as_base64().map(str::to_string))
        .collect();

    let request = GenerateRequest {
        model: args.model_name.clone(),
        prompt: prompt.clone(),
        max_new_tokens: args.max_new_tokens,
        temperature: TEMPERATURE,
        stop: conv.sep2.clone(),
        images,
    };

    let worker = WorkerClient::new(worker_addr);
    let mut chunks = worker.generate_stream(&request).await?;

    printer::print_prompt(&prompt)?;
    while let Some(chunk) = chunks.next_chunk().await? {
        printer::print_chunk(&chunk.text)?;
    }
    printer::finish()?;

    Ok(())
}
