use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tracing::debug;

/// Decodes a downloaded text payload.
///
/// A BOM wins; otherwise valid UTF-8 is taken as is and anything else is
/// decoded with the encoding `chardetng` guesses.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    debug!(encoding = encoding.name(), "payload is not utf-8");

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
