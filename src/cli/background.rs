use crate::{background::BackgroundRemovalService, success, warning};

pub async fn remove_background(image_url: String) {
    let service = BackgroundRemovalService::from_env();
    if !service.is_enabled() {
        warning!("BG_REMOVAL_API_KEYS is not set, nothing to do");
    }

    let processed = service.remove_background(&image_url).await;
    if processed == image_url {
        warning!("Background could not be removed, keeping the original image");
    } else {
        success!("Background removed");
    }
    println!("{}", processed);
}
