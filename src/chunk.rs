//! Line-preserving text chunker.
//!
//! The destination channel enforces a hard per-message character ceiling, so
//! arbitrarily long console output has to be partitioned before dispatch. The
//! chunker is pure: no I/O, no errors, same input always yields the same
//! chunks. Fencing for fixed-width rendering is applied by the dispatcher,
//! never here.

/// Per-message character ceiling enforced by the destination channel.
pub const MESSAGE_CEILING: usize = 2000;

/// Usable characters per chunk once the code-fence wrapping of [`fence`] is
/// accounted for (with a small margin).
pub const DEFAULT_CHUNK_SIZE: usize = 1990;

/// Split `content` into chunks of at most `max_chunk_size` bytes, breaking
/// only on line boundaries.
///
/// Whole lines (split on `\n`) are accumulated while the chunk plus the next
/// line and its separator still fit the budget (strict `<=`); otherwise the
/// chunk is emitted and accumulation restarts with that line. A single line
/// longer than the budget is emitted as its own oversized chunk rather than
/// split mid-line. Empty input yields one empty chunk.
///
/// Joining the chunks with `\n` reproduces `content` exactly.
pub fn chunk_text(content: &str, max_chunk_size: usize) -> Vec<String> {
    let mut lines = content.split('\n');
    let mut current: String = lines.next().unwrap_or_default().to_string();
    let mut chunks = Vec::new();

    for line in lines {
        if current.len() + 1 + line.len() <= max_chunk_size {
            current.push('\n');
            current.push_str(line);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(line);
        }
    }
    chunks.push(current);
    chunks
}

/// Wrap a chunk in triple-backtick fences on their own lines, for
/// fixed-width rendering on the destination side.
pub fn fence(chunk: &str) -> String {
    format!("```\n{chunk}\n```")
}
