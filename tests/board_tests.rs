use drillpath::board::{self, Board, DistanceMatrix, Hole};
use drillpath::error::DrillError;
use rstest::rstest;
use std::fs;

#[rstest]
#[case::empty_file("")]
#[case::zero_size("0\n")]
#[case::size_not_integer("three\n1 0 0\n")]
#[case::too_few_rows("3\n1 0 0\n0 1 0\n")]
#[case::too_many_rows("2\n1 0\n0 1\n1 1\n")]
#[case::short_row("3\n1 0 0\n0 1\n0 0 1\n")]
#[case::long_row("2\n1 0 1\n0 1\n")]
#[case::bad_cell("2\n1 2\n0 1\n")]
#[case::negative_cell("2\n1 -1\n0 1\n")]
#[case::huge_size_overflow("4294967296\n1 0\n")]
#[case::huge_size_few_rows("100000000000\n1 0\n")]
fn test_malformed_boards(#[case] text: &str) {
    assert!(
        matches!(Board::parse(text), Err(DrillError::MalformedBoard(_))),
        "{:?} should be malformed",
        text
    );
}

#[rstest]
#[case::no_holes("2\n0 0\n0 0\n", 0)]
#[case::one_hole("3\n0 0 0\n0 1 0\n0 0 0\n", 1)]
fn test_boards_without_a_tour(#[case] text: &str, #[case] found: usize) {
    let board = Board::parse(text).unwrap();
    match board::extract_holes(&board) {
        Err(DrillError::EmptyBoard(n)) => assert_eq!(n, found),
        other => panic!("expected EmptyBoard, got {:?}", other.map(|h| h.len())),
    }
}

#[test]
fn test_load_generator_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board_5_1.txt");
    fs::write(&path, "5\n1 0 0 0 1 \n0 0 0 0 0 \n\n0 0 1 0 0 \n0 0 0 0 0 \n1 0 0 0 1 \n").unwrap();

    let board = Board::load(&path).unwrap();
    let holes = board::extract_holes(&board).unwrap();
    assert_eq!(
        holes,
        vec![
            Hole { x: 0, y: 0 },
            Hole { x: 4, y: 0 },
            Hole { x: 2, y: 2 },
            Hole { x: 0, y: 4 },
            Hole { x: 4, y: 4 },
        ]
    );

    let m = DistanceMatrix::from_holes(&holes);
    assert_eq!(m.len(), 5);
    assert_eq!(m.get(0, 1), 4.0);
    assert_eq!(m.get(1, 0), 4.0);
    assert!((m.get(0, 2) - 8f64.sqrt()).abs() < 1e-12);
    assert_eq!(m.get(3, 3), 0.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Board::load(dir.path().join("absent.txt")),
        Err(DrillError::Io(_))
    ));
}
