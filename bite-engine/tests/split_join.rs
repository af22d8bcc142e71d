//! Integration tests for splitting files into chunks and joining them back

use bite_engine::{
    join_chunks, scan_chunk_directory, split_by_lines, ChunkError, ChunkSource, JoinOptions,
    SplitInput, SplitOptions, TextEncoding,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PEOPLE: [&str; 10] = [
    "Name;Age;",
    "Test;00;",
    "Test;11;",
    "John;22;",
    "Test;33;",
    "Test;44;",
    "Test;55;",
    "Test;66;",
    "Test;77;",
    "Test;88;",
];

fn write_input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn join_to_string(dir: &Path, options: &JoinOptions) -> String {
    join_chunks(ChunkSource::Directory(dir.to_path_buf()), options)
        .unwrap()
        .read_to_string()
        .unwrap()
}

#[test]
fn test_people_split_with_persisted_header() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "people.csv", &PEOPLE.join("\n"));
    let out = temp_dir.path().join("chunks");

    let files = split_by_lines(
        SplitInput::from_file(&input),
        &out,
        &SplitOptions::new(4).header_from_input(),
    )
    .unwrap();

    assert_eq!(files.len(), 3);
    let names: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "people.chunk0000.csv",
            "people.chunk0001.csv",
            "people.chunk0002.csv"
        ]
    );

    let expected = [
        format!("{}\n{}\n", PEOPLE[0], PEOPLE[1..=4].join("\n")),
        format!("{}\n{}\n", PEOPLE[0], PEOPLE[5..=8].join("\n")),
        format!("{}\n{}", PEOPLE[0], PEOPLE[9]),
    ];
    for (file, expected) in files.iter().zip(&expected) {
        assert_eq!(&fs::read_to_string(file).unwrap(), expected);
    }

    let joined = join_to_string(&out, &JoinOptions::default().persisted_header());
    assert_eq!(joined, PEOPLE.join("\n"));
}

#[test]
fn test_round_trip_variants() {
    let bodies = [
        "a\nb\nc\nd\ne",
        "a\nb\nc\nd\ne\n",
        "a\n\n\nb\n",
        "single line",
        "\n",
    ];

    for body in bodies {
        for with_header in [false, true] {
            let temp_dir = TempDir::new().unwrap();
            let content = if with_header {
                format!("header\n{body}")
            } else {
                body.to_string()
            };
            let input = write_input(temp_dir.path(), "data.txt", &content);
            let out = temp_dir.path().join("out");

            let mut split = SplitOptions::new(2);
            let mut join = JoinOptions::default();
            if with_header {
                split = split.header_from_input();
                join = join.persisted_header();
            }

            split_by_lines(SplitInput::from_file(&input), &out, &split).unwrap();
            assert_eq!(
                join_to_string(&out, &join),
                content,
                "round trip of {content:?}"
            );
        }
    }
}

#[test]
fn test_explicit_header_on_disk_and_in_join() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");

    let files = split_by_lines(
        SplitInput::from_text("rows.txt", "1\n2\n3\n"),
        &out,
        &SplitOptions::new(2).header("id"),
    )
    .unwrap();
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), "id\n1\n2\n");
    assert_eq!(fs::read_to_string(&files[1]).unwrap(), "id\n3\n");

    let joined = join_to_string(&out, &JoinOptions::default().header("ID"));
    assert_eq!(joined, "ID\n1\n2\n3\n");
}

#[test]
fn test_missing_chunk_in_directory() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let files = split_by_lines(
        SplitInput::from_text("log.txt", "a\nb\nc\n"),
        &out,
        &SplitOptions::new(1),
    )
    .unwrap();
    fs::remove_file(&files[1]).unwrap();

    let result = join_chunks(ChunkSource::Directory(out.clone()), &JoinOptions::default())
        .unwrap()
        .read_to_string();
    match result {
        Err(ChunkError::MissingChunk {
            expected, found, ..
        }) => {
            assert_eq!(expected, 1);
            assert_eq!(found, 2);
        }
        other => panic!("expected a missing chunk error, got {other:?}"),
    }

    let joined = join_to_string(&out, &JoinOptions::default().ignore_missing_chunks());
    assert_eq!(joined, "a\nc\n");
}

#[test]
fn test_split_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "data.txt", "1\n2\n3\n4\n5\n");
    let out = temp_dir.path().join("out");
    let options = SplitOptions::new(2);

    let first = split_by_lines(SplitInput::from_file(&input), &out, &options).unwrap();
    let first_content: Vec<_> = first.iter().map(|f| fs::read(f).unwrap()).collect();
    let second = split_by_lines(SplitInput::from_file(&input), &out, &options).unwrap();
    let second_content: Vec<_> = second.iter().map(|f| fs::read(f).unwrap()).collect();

    assert_eq!(first, second);
    assert_eq!(first_content, second_content);
    assert_eq!(scan_chunk_directory(&out).unwrap(), first);
}

#[test]
fn test_latin1_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let encoding = TextEncoding::for_label("latin1").unwrap();
    let content = "nom;ville\nZoé;Besançon\nJosé;Málaga\n";
    let bytes = encoding.encode(content).unwrap().into_owned();
    assert_ne!(bytes, content.as_bytes());

    let input = temp_dir.path().join("villes.csv");
    fs::write(&input, &bytes).unwrap();
    let out = temp_dir.path().join("out");

    let files = split_by_lines(
        SplitInput::from_file(&input),
        &out,
        &SplitOptions::new(1).header_from_input().encoding(encoding),
    )
    .unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(
        fs::read(&files[1]).unwrap(),
        encoding.encode("nom;ville\nJosé;Málaga\n").unwrap().into_owned()
    );

    let mut output = Vec::new();
    join_chunks(
        ChunkSource::Directory(out),
        &JoinOptions::default().persisted_header().encoding(encoding),
    )
    .unwrap()
    .write_to(&mut output)
    .unwrap();
    assert_eq!(output, bytes);
}

#[test]
fn test_invalid_utf8_is_an_encoding_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bad.txt");
    fs::write(&input, b"ok\n\xff\xfe\n").unwrap();

    let result = split_by_lines(
        SplitInput::from_file(&input),
        temp_dir.path().join("out"),
        &SplitOptions::new(10),
    );
    assert!(matches!(result, Err(ChunkError::Encoding { .. })));
}
