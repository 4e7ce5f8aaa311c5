//! Basic tests for yomu-api

use std::io::{self, Read};
use yomu_api::*;

#[test]
fn test_process_text_convenience() {
    let output = process_text("東京へ行く。京都へ行く。").unwrap();

    assert_eq!(output.sentences.len(), 2);
    assert_eq!(output.sentences[0].text, "東京へ行く。");
    assert_eq!(output.sentences[1].begin, 6);
    assert_eq!(output.metadata.total_chars, 12);
    assert_eq!(output.metadata.sentence_count, 2);
    assert_eq!(output.metadata.morpheme_count, 10);
    assert_eq!(output.metadata.split_mode, "C");
    assert_eq!(output.metadata.encoding, "UTF-8");
}

#[test]
fn test_empty_input() {
    let output = process_text("").unwrap();
    assert!(output.sentences.is_empty());
    assert_eq!(output.metadata.total_chars, 0);
}

#[test]
fn test_config_builder() {
    let config = Config::builder()
        .split_mode("A")
        .unwrap()
        .read_chunk(16)
        .sentence_limit(64)
        .build()
        .unwrap();
    let tokenizer = SentenceTokenizer::with_config(config).unwrap();

    let output = tokenizer.process_text("国家公務員。").unwrap();
    let surfaces: Vec<&str> = output.sentences[0]
        .morphemes
        .iter()
        .map(|m| m.surface.as_str())
        .collect();
    assert_eq!(surfaces, vec!["国", "家", "公", "務", "員", "。"]);
    assert_eq!(output.metadata.split_mode, "A");
}

#[test]
fn test_explicit_split_mode() {
    let tokenizer = SentenceTokenizer::new().unwrap();
    let output = tokenizer
        .process_with_mode(Input::from_text("国家公務員"), yomu_engine::SplitMode::B)
        .unwrap();
    assert_eq!(output.sentences[0].morphemes.len(), 3);
}

#[test]
fn test_bytes_with_encoding() {
    let config = Config::builder().encoding("euc-jp").build().unwrap();
    let tokenizer = SentenceTokenizer::with_config(config).unwrap();
    let (bytes, _, _) = yomu_engine::input::encoding_for_label("euc-jp")
        .unwrap()
        .encode("晴れ。雨。");

    let output = tokenizer
        .process(Input::from_bytes(bytes.into_owned()))
        .unwrap();
    assert_eq!(output.sentences.len(), 2);
    assert_eq!(output.metadata.encoding, "EUC-JP");
}

#[test]
fn test_file_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::write(&path, "雪が降る。").unwrap();

    let output = process_file(&path).unwrap();
    assert_eq!(output.sentences.len(), 1);
    assert_eq!(output.sentences[0].text, "雪が降る。");
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yomu.toml");
    std::fs::write(&path, "split_mode = \"B\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.split_mode(), yomu_engine::SplitMode::B);

    std::fs::write(&path, "split_mode = \n").unwrap();
    assert!(matches!(Config::from_file(&path), Err(ApiError::Engine(_))));
}

#[test]
fn test_missing_file_is_a_source_fault() {
    let err = process_file("/nonexistent/yomu/input.txt").unwrap_err();
    assert!(err.is_source_fault());
}

/// Reader that fails after handing out its data
struct FailReader {
    data: io::Cursor<Vec<u8>>,
}

impl Read for FailReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::other("All data used.")),
            n => Ok(n),
        }
    }
}

#[test]
fn test_lazy_sentences_report_fault_once() {
    let tokenizer = SentenceTokenizer::new().unwrap();
    let reader = FailReader {
        data: io::Cursor::new("晴れ。雨".as_bytes().to_vec()),
    };
    let results: Vec<_> = tokenizer.sentences(Input::from_reader(reader)).collect();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().text, "晴れ。");
    assert!(results[1].as_ref().unwrap_err().is_source_fault());
}

#[test]
fn test_process_propagates_fault() {
    let tokenizer = SentenceTokenizer::new().unwrap();
    let reader = FailReader {
        data: io::Cursor::new("晴れ。".as_bytes().to_vec()),
    };
    assert!(tokenizer
        .process(Input::from_reader(reader))
        .unwrap_err()
        .is_source_fault());
}

#[cfg(feature = "serde")]
#[test]
fn test_json_output() {
    let output = process_text("晴れ。").unwrap();
    let json = output.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["sentences"][0]["text"], "晴れ。");
    assert_eq!(value["sentences"][0]["morphemes"][0]["category"], "KANJI");
    assert_eq!(value["metadata"]["sentence_count"], 1);
    assert!(output.to_json_pretty().unwrap().contains('\n'));
}
