use blog_core::{first_inline_data, Error, ImageCandidate, ImageModel, Part, Result};
use futures::future::try_join_all;
use tracing::{debug, info};

/// Renders one prompt. `logo`, when given, is sent as an extra inline PNG.
pub async fn generate_image(images: &dyn ImageModel, prompt: &str, logo: Option<&[u8]>) -> Result<Vec<u8>> {
    info!("🎨 Generating image with {}...", images.name());
    let mut parts = vec![Part::text(prompt)];
    if let Some(logo) = logo {
        info!("🏷️ Including logo in image generation...");
        parts.push(Part::png(logo));
    }

    generate_image_from_parts(images, &parts).await
}

/// Sends arbitrary parts and extracts the first inline image.
pub async fn generate_image_from_parts(images: &dyn ImageModel, parts: &[Part]) -> Result<Vec<u8>> {
    let response = images
        .generate_content(parts)
        .await
        .map_err(|e| match e {
            Error::NoImage(_) => e,
            other => Error::Generation(format!("{} API error: {}", images.name(), other)),
        })?;

    let data = first_inline_data(&response)
        .ok_or_else(|| Error::NoImage(format!("No image data found in {} response", images.name())))?;
    debug!("Received {} image bytes", data.len());
    info!("✅ Image generated successfully");
    Ok(data.to_vec())
}

/// Renders every prompt concurrently. One failure fails the whole batch.
pub async fn generate_candidates(images: &dyn ImageModel, prompts: &[String]) -> Result<Vec<ImageCandidate>> {
    info!("🎨 Generating {} image variations...", prompts.len());
    let total = prompts.len();
    let renders = prompts.iter().enumerate().map(|(i, prompt)| async move {
        info!("🖼️ Generating image {}/{}...", i + 1, total);
        let data = generate_image(images, prompt, None).await?;
        Ok::<_, Error>(ImageCandidate {
            index: i + 1,
            prompt: prompt.clone(),
            data,
        })
    });

    let candidates = try_join_all(renders).await?;
    info!("✅ Generated {} image variations", candidates.len());
    Ok(candidates)
}
