//! `/menus` and `/public/menus` endpoints

use serde::Serialize;
use shared::models::{Menu, MenuCreate, MenuUpdate};
use shared::response::PaginatedResponse;

use super::PageQuery;
use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Serialize)]
struct MenuListQuery<'a> {
    #[serde(flatten)]
    page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<&'a str>,
}

#[derive(Serialize)]
struct CategoryFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<&'a str>,
}

impl ApiClient {
    /// Staff menu list, optionally filtered by category
    pub async fn menus(
        &self,
        page: PageQuery,
        category_id: Option<&str>,
    ) -> ClientResult<PaginatedResponse<Menu>> {
        self.get_page("/menus", &MenuListQuery { page, category_id })
            .await
    }

    pub async fn menu(&self, id: &str) -> ClientResult<Menu> {
        self.get(&format!("/menus/{id}")).await
    }

    pub async fn create_menu(&self, req: &MenuCreate) -> ClientResult<Menu> {
        self.post("/menus", req).await
    }

    pub async fn update_menu(&self, id: &str, req: &MenuUpdate) -> ClientResult<Menu> {
        self.put(&format!("/menus/{id}"), req).await
    }

    pub async fn delete_menu(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/menus/{id}")).await
    }

    /// Upload a menu photo as multipart field `image`
    pub async fn upload_menu_image(
        &self,
        id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<Menu> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);
        self.post_multipart(&format!("/menus/{id}/upload-image"), form)
            .await
    }

    /// Menus a customer may order right now
    pub async fn available_menus(&self, category_id: Option<&str>) -> ClientResult<Vec<Menu>> {
        self.get_query("/public/menus", &CategoryFilter { category_id })
            .await
    }

    pub async fn public_menu(&self, id: &str) -> ClientResult<Menu> {
        self.get(&format!("/public/menus/{id}")).await
    }
}
