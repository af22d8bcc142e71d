//! Property tests for chunking and for split/join of files

use bite_engine::{
    chunk_by, chunks_of, join_chunks, split_by_lines, ChunkSource, HeaderMode, JoinOptions,
    SplitInput, SplitOptions,
};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn text_lines() -> impl Strategy<Value = String> {
    (prop::collection::vec("[a-z;0-9 ]{0,12}", 0..40), any::<bool>()).prop_map(
        |(lines, trailing_newline)| {
            let mut text = lines.join("\n");
            if trailing_newline && !lines.is_empty() {
                text.push('\n');
            }
            text
        },
    )
}

proptest! {
    #[test]
    fn prop_chunks_partition_the_source(
        source in prop::collection::vec(any::<u16>(), 0..300),
        chunk_size in 1usize..50,
    ) {
        let chunks: Vec<Vec<u16>> = chunks_of(source.clone(), chunk_size).unwrap().collect();

        prop_assert_eq!(chunks.len(), source.len().div_ceil(chunk_size));
        prop_assert!(chunks.iter().all(|chunk| !chunk.is_empty()));
        if let Some((last, full)) = chunks.split_last() {
            prop_assert!(full.iter().all(|chunk| chunk.len() == chunk_size));
            prop_assert!(last.len() <= chunk_size);
        }

        let flattened: Vec<u16> = chunks.into_iter().flatten().collect();
        prop_assert_eq!(flattened, source);
    }

    #[test]
    fn prop_header_leads_every_chunk(
        source in prop::collection::vec(any::<u8>(), 1..200),
        chunk_size in 1usize..20,
    ) {
        let header = u32::from(source[0]);
        let chunks: Vec<Vec<u32>> =
            chunk_by(source.clone(), chunk_size, |x| u32::from(x) + 1000, HeaderMode::from_source())
                .unwrap()
                .collect();

        prop_assert_eq!(chunks.len(), (source.len() - 1).div_ceil(chunk_size));
        for chunk in &chunks {
            prop_assert_eq!(chunk[0], header);
            prop_assert!((2..=chunk_size + 1).contains(&chunk.len()));
        }

        let data: Vec<u32> = chunks.iter().flat_map(|chunk| chunk[1..].to_vec()).collect();
        let expected: Vec<u32> = source[1..].iter().map(|&x| u32::from(x) + 1000).collect();
        prop_assert_eq!(data, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_split_then_join_is_lossless(
        text in text_lines(),
        lines_per_chunk in 1usize..8,
        with_header in any::<bool>(),
    ) {
        let temp_dir = TempDir::new().unwrap();
        let content = if with_header { format!("header\n{text}") } else { text };
        let input = temp_dir.path().join("input.txt");
        fs::write(&input, &content).unwrap();
        let out = temp_dir.path().join("out");

        let mut split = SplitOptions::new(lines_per_chunk);
        let mut join = JoinOptions::default();
        if with_header {
            split = split.header_from_input();
            join = join.persisted_header();
        }

        let files = split_by_lines(SplitInput::from_file(&input), &out, &split).unwrap();
        let data_lines = content.split_inclusive('\n').count() - usize::from(with_header);
        prop_assert_eq!(files.len(), data_lines.div_ceil(lines_per_chunk));

        for (i, file) in files.iter().enumerate() {
            let lines = fs::read_to_string(file).unwrap().split_inclusive('\n').count();
            let data = lines - usize::from(with_header);
            if i + 1 < files.len() {
                prop_assert_eq!(data, lines_per_chunk);
            } else {
                prop_assert!((1..=lines_per_chunk).contains(&data));
            }
        }

        let joined: String = join_chunks(ChunkSource::Directory(out), &join)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        // A header with no data lines produces no chunk files
        if files.is_empty() {
            prop_assert_eq!(joined, "");
        } else {
            prop_assert_eq!(joined, content);
        }
    }
}
