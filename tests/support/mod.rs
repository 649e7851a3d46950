//! テスト用スタブクライアント

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use stock_meta_common::{Error, Result, UploadedImage};
use stock_meta_rust::gemini::{GenerateRequest, ModelClient};

/// 固定応答を順に返し、受け取ったリクエストを記録するクライアント
pub struct StubClient {
    responses: Mutex<VecDeque<std::result::Result<String, String>>>,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl StubClient {
    pub fn new(responses: Vec<std::result::Result<&str, &str>>) -> Self {
        let responses = responses
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(response: &str) -> Self {
        Self::new(vec![Ok(response)])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message)])
    }

    pub fn recorded(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport("no canned response".to_string())),
        }
    }
}

pub fn png_image() -> UploadedImage {
    UploadedImage::from_bytes("mascot.png", "image/png", b"\x89PNG fake").unwrap()
}

pub fn jpeg_image() -> UploadedImage {
    UploadedImage::from_bytes("fox.jpg", "image/jpeg", b"\xFF\xD8\xFF fake").unwrap()
}
