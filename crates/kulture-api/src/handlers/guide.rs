use axum::Json;
use kulture_core::guide::{ResponsibleTourismGuide, GUIDE};

/// Static content; never touches the store
pub async fn get_guide() -> Json<ResponsibleTourismGuide> {
    Json(GUIDE)
}
