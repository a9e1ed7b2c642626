//! Request payloads and runtime configuration for the EdgeCast API.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// EdgeCast delivery platform a cached object lives on.
///
/// The cache-management API identifies platforms by numeric code; these are
/// the four codes the endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    FlashMediaStreaming,
    HttpLargeObject,
    HttpSmallObject,
    ApplicationDeliveryNetwork,
}

impl MediaType {
    /// Numeric code sent in the `MediaType` payload field.
    pub fn code(self) -> u8 {
        match self {
            MediaType::FlashMediaStreaming => 2,
            MediaType::HttpLargeObject => 3,
            MediaType::HttpSmallObject => 8,
            MediaType::ApplicationDeliveryNetwork => 14,
        }
    }
}

impl From<MediaType> for u8 {
    fn from(media_type: MediaType) -> u8 {
        media_type.code()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::FlashMediaStreaming => "flash-media-streaming",
            MediaType::HttpLargeObject => "http-large-object",
            MediaType::HttpSmallObject => "http-small-object",
            MediaType::ApplicationDeliveryNetwork => "application-delivery-network",
        };
        f.write_str(name)
    }
}

impl FromStr for MediaType {
    type Err = String;

    /// Accepts the kebab-case platform name or its numeric code.
    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input {
            "flash-media-streaming" | "2" => Ok(MediaType::FlashMediaStreaming),
            "http-large-object" | "3" => Ok(MediaType::HttpLargeObject),
            "http-small-object" | "8" => Ok(MediaType::HttpSmallObject),
            "application-delivery-network" | "14" => Ok(MediaType::ApplicationDeliveryNetwork),
            other => Err(format!(
                "Unknown media type '{}'. Expected flash-media-streaming, \
                 http-large-object, http-small-object, \
                 application-delivery-network, or a numeric code (2, 3, 8, 14)",
                other
            )),
        }
    }
}

/// Wire payload shared by the purge and load methods.
///
/// Serializes to `{"MediaType": <code>, "MediaPath": "<path>"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheRequest {
    pub media_type: u8,
    pub media_path: String,
}

impl CacheRequest {
    pub fn new(media_type: MediaType, media_path: impl Into<String>) -> Self {
        Self {
            media_type: media_type.code(),
            media_path: media_path.into(),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub account_number: String,
    pub token: String,
    pub cdn_base_url: String,
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            account_number: std::env::var("EDGECAST_ACCOUNT")
                .map_err(|_| Error::Config("EDGECAST_ACCOUNT not set".to_string()))?,
            token: std::env::var("EDGECAST_TOKEN")
                .map_err(|_| Error::Config("EDGECAST_TOKEN not set".to_string()))?,
            cdn_base_url: std::env::var("EDGECAST_CDN_BASE_URL")
                .map_err(|_| Error::Config("EDGECAST_CDN_BASE_URL not set".to_string()))?,
            api_base_url: std::env::var("EDGECAST_API_BASE_URL")
                .unwrap_or_else(|_| crate::cache::client::DEFAULT_API_BASE_URL.to_string()),
        })
    }
}
