//! Shared fixtures for integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use encoding_rs::SHIFT_JIS;
use std::io::{Cursor, Write};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A short work laid out the way Aozora Bunko files are
pub const SAMPLE_WORK: &str = "\
羅生門\r\n\
芥川龍之介\r\n\
\r\n\
-------------------------------------------------------\r\n\
【テキスト中に現れる記号について】\r\n\
\r\n\
《》：ルビ\r\n\
（例）下人《げにん》\r\n\
-------------------------------------------------------\r\n\
\r\n\
\u{3000}ある日の暮方《くれがた》の事である。一人の下人《げにん》が、羅生門《らしょうもん》の下で雨やみを待っていた。\r\n\
\r\n\
\r\n\
\r\n\
［＃地から１字上げ］（大正四年九月）\r\n\
\r\n\
底本：「芥川龍之介全集１」ちくま文庫、筑摩書房\r\n\
入力：j.utiyama\r\n";

/// What [`SAMPLE_WORK`] cleans to
pub const SAMPLE_CLEANED: &str = "ある日の暮方の事である。一人の下人が、羅生門の下で雨やみを待っていた。\n\n（大正四年九月）";

pub fn shift_jis(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = SHIFT_JIS.encode(text);
    assert!(!had_errors, "sample text must be representable in Shift_JIS");
    bytes.into_owned()
}

/// Build a DEFLATE-compressed ZIP from `(name, data)` pairs
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A ZIP holding [`SAMPLE_WORK`] the way Aozora Bunko ships it
pub fn sample_archive() -> Vec<u8> {
    build_zip(&[("rashomon.txt", &shift_jis(SAMPLE_WORK))])
}

/// Serve `body` at `route` with status 200
pub async fn serve_bytes(server: &MockServer, route: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Serve an empty response with `status` at `route`
pub async fn serve_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
