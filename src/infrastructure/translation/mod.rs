mod client;

pub use client::{
    AUTH_HEADER, CONNECT_TIMEOUT, DEFAULT_BASE_URL, HttpTranslationClient, REQUEST_TIMEOUT,
};
