//! Streaming text copy with output encoding.

use std::io::{self, Read, Write};

use encoding_rs::{DecoderResult, EncoderResult, Encoding, UTF_8};

const CHUNK_SIZE: usize = 8 * 1024;

/// Copy UTF-8 text from `reader` to `writer`, encoding it as `encoding`.
///
/// The reader is consumed to its end in fixed-size chunks; a code point split
/// across two reads is carried over. Characters `encoding` cannot represent
/// are written as `?`. Reader errors, including malformed UTF-8, surface
/// as-is; writer errors surface as the writer raised them.
///
/// Returns the number of bytes written.
pub fn copy_text<R, W>(
    reader: &mut R,
    writer: &mut W,
    encoding: &'static Encoding,
) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut decoder = UTF_8.new_decoder_without_bom_handling();
    let mut encoder = encoding.new_encoder();
    let mut input = vec![0u8; CHUNK_SIZE];
    let mut text = String::with_capacity(CHUNK_SIZE);
    let mut output = Vec::with_capacity(CHUNK_SIZE);
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut input) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let last = n == 0;

        text.clear();
        decode(&mut decoder, &input[..n], &mut text, last)?;

        output.clear();
        encode(&mut encoder, &text, &mut output, last);
        writer.write_all(&output)?;
        total += output.len() as u64;

        if last {
            break;
        }
    }

    writer.flush()?;
    Ok(total)
}

fn decode(
    decoder: &mut encoding_rs::Decoder,
    mut src: &[u8],
    dst: &mut String,
    last: bool,
) -> io::Result<()> {
    loop {
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(src.len())
            .unwrap_or(src.len() * 3 + 4);
        dst.reserve(needed);

        let (result, read) = decoder.decode_to_string_without_replacement(src, dst, last);
        src = &src[read..];
        match result {
            DecoderResult::InputEmpty => return Ok(()),
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(_, _) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "content stream is not valid UTF-8",
                ));
            }
        }
    }
}

fn encode(encoder: &mut encoding_rs::Encoder, mut src: &str, dst: &mut Vec<u8>, last: bool) {
    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(src.len())
            .unwrap_or(src.len() * 4 + 16);
        dst.reserve(needed);

        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(src, dst, last);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => return,
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(_) => dst.push(b'?'),
        }
    }
}
