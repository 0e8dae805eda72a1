//! `solace extract-sentences`: Build the sentence pool used to prepare
//! embedding training pairs.
//!
//! Reads every `.txt` document in the knowledge base and writes one
//! candidate sentence per line.

use std::path::{Path, PathBuf};

pub async fn run(
    config_path: Option<&Path>,
    input: Option<PathBuf>,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = match input {
        Some(dir) => dir,
        None => super::load_config(config_path)?.knowledge.dir,
    };

    let count = write_pool(&input, output)?;
    tracing::info!(input = %input.display(), output = %output.display(), count, "Sentence pool written");
    println!("Extracted {count} sentences to {}", output.display());

    Ok(())
}

/// Extract sentences from the `.txt` files in `input` into `output`.
/// Returns the number of sentences written.
fn write_pool(input: &Path, output: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let documents = solace_memory::load_documents(input)?;

    let sentences: Vec<String> = documents
        .iter()
        .filter(|doc| doc.source.ends_with(".txt"))
        .flat_map(|doc| solace_memory::extract_sentences(&doc.content))
        .collect();

    let mut pool = String::new();
    for sentence in &sentences {
        pool.push_str(sentence);
        pool.push('\n');
    }
    std::fs::write(output, pool)?;

    Ok(sentences.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_sentence_per_line_from_txt_files() {
        let kb = tempfile::tempdir().unwrap();
        std::fs::write(
            kb.path().join("a_anxiety.txt"),
            "Anxiety is a normal response. Too short.\nBreathing slowly can help a lot",
        )
        .unwrap();
        std::fs::write(kb.path().join("b_notes.md"), "Markdown sentences are skipped here.").unwrap();

        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("pool.txt");
        let count = write_pool(kb.path(), &output).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Anxiety is a normal response\nToo short\nBreathing slowly can help a lot\n"
        );
    }

    #[test]
    fn empty_knowledge_base_writes_empty_pool() {
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("pool.txt");
        let count = write_pool(Path::new("/nonexistent/kb"), &output).unwrap();
        assert_eq!(count, 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }
}
