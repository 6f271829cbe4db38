//! Board tests - collision, stamping and line clearing

use blockfall::core::{spawn_shape, Board, CoreError, SimpleRng};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i32, kind: PieceKind) {
    for x in 0..board.width() as i32 {
        board.set(x, y, Some(kind)).unwrap();
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.is_occupied(x, y), Ok(false), "({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), Err(CoreError::OutOfBounds { x: -1, y: 0 }));
    assert_eq!(board.get(0, -1), Err(CoreError::OutOfBounds { x: 0, y: -1 }));
    assert!(board.get(BOARD_WIDTH as i32, 0).is_err());
    assert!(board.get(0, BOARD_HEIGHT as i32).is_err());
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::new();
    assert!(board.set(-1, 0, Some(PieceKind::T)).is_err());
    assert!(board.set(0, BOARD_HEIGHT as i32, Some(PieceKind::T)).is_err());
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_collides_walls_and_floor() {
    let board = Board::new();
    let o = spawn_shape(PieceKind::O);

    assert!(!board.collides(&o, 0, 0));
    assert!(!board.collides(&o, 8, 18));
    assert!(board.collides(&o, -1, 5));
    assert!(board.collides(&o, 9, 5));
    assert!(board.collides(&o, 4, 19));
    // Partially above the grid is fine
    assert!(!board.collides(&o, 4, -1));
    // Completely above the grid is fine too
    assert!(!board.collides(&o, 4, -5));
    // ...but the side walls extend upward
    assert!(board.collides(&o, -1, -5));
}

#[test]
fn test_collides_with_stack() {
    let mut board = Board::new();
    board.set(5, 10, Some(PieceKind::T)).unwrap();
    let o = spawn_shape(PieceKind::O);

    assert!(board.collides(&o, 4, 9));
    assert!(board.collides(&o, 5, 10));
    assert!(!board.collides(&o, 6, 9));
    assert!(!board.collides(&o, 4, 7));
}

#[test]
fn test_collides_is_monotonic_in_occupancy() {
    let mut rng = SimpleRng::new(2024);
    let shapes: Vec<_> = PieceKind::ALL.iter().map(|&k| spawn_shape(k)).collect();
    let mut board = Board::new();

    // Record every colliding query, then keep adding cells: none may flip back.
    let mut colliding = Vec::new();
    for round in 0..40 {
        let x = rng.next_range(BOARD_WIDTH as u32) as i32;
        let y = rng.next_range(BOARD_HEIGHT as u32) as i32;
        board.set(x, y, Some(PieceKind::L)).unwrap();

        for (i, shape) in shapes.iter().enumerate() {
            for oy in -2..BOARD_HEIGHT as i32 {
                for ox in -2..BOARD_WIDTH as i32 {
                    if board.collides(shape, ox, oy) {
                        colliding.push((i, ox, oy));
                    }
                }
            }
        }
        for &(i, ox, oy) in &colliding {
            assert!(board.collides(&shapes[i], ox, oy), "round {}", round);
        }
    }
}

#[test]
fn test_stamp_writes_piece_kind() {
    let mut board = Board::new();
    let t = spawn_shape(PieceKind::T);
    board.stamp(&t, 3, 5).unwrap();

    assert_eq!(board.get(4, 5), Ok(Some(PieceKind::T)));
    assert_eq!(board.get(3, 6), Ok(Some(PieceKind::T)));
    assert_eq!(board.get(4, 6), Ok(Some(PieceKind::T)));
    assert_eq!(board.get(5, 6), Ok(Some(PieceKind::T)));
    // Filler cells of the matrix are not written
    assert_eq!(board.get(3, 5), Ok(None));
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_stamp_above_grid_is_silently_dropped() {
    let mut board = Board::new();
    let bar = spawn_shape(PieceKind::I).rotated_cw();
    board.stamp(&bar, 0, -3).unwrap();
    assert_eq!(board.occupied_count(), 1);
    assert_eq!(board.get(0, 0), Ok(Some(PieceKind::I)));

    board.clear();
    board.stamp(&bar, 0, -10).unwrap();
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_board_is_row_full() {
    let mut board = Board::new();
    assert!(!board.is_row_full(5));

    fill_row(&mut board, 5, PieceKind::T);
    assert!(board.is_row_full(5));

    for x in 0..BOARD_WIDTH as i32 - 1 {
        board.set(x, 6, Some(PieceKind::I)).unwrap();
    }
    assert!(!board.is_row_full(6));
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_board_clear_full_rows() {
    let mut board = Board::new();

    fill_row(&mut board, 18, PieceKind::I);
    fill_row(&mut board, 19, PieceKind::O);
    board.set(0, 17, Some(PieceKind::T)).unwrap();

    assert_eq!(board.clear_full_rows(), 2);

    // The T cell dropped by 2 rows
    assert_eq!(board.get(0, 19), Ok(Some(PieceKind::T)));
    assert_eq!(board.occupied_count(), 1);
}

#[test]
fn test_board_clear_multiple_rows_order() {
    let mut board = Board::new();

    fill_row(&mut board, 5, PieceKind::T);
    fill_row(&mut board, 10, PieceKind::I);
    fill_row(&mut board, 15, PieceKind::O);

    board.set(0, 4, Some(PieceKind::J)).unwrap(); // Above row 5
    board.set(0, 9, Some(PieceKind::L)).unwrap(); // Above row 10
    board.set(0, 14, Some(PieceKind::S)).unwrap(); // Above row 15

    assert_eq!(board.clear_full_rows(), 3);

    // Each marker drops by the number of cleared rows below it
    assert_eq!(board.get(0, 7), Ok(Some(PieceKind::J)));
    assert_eq!(board.get(0, 11), Ok(Some(PieceKind::L)));
    assert_eq!(board.get(0, 15), Ok(Some(PieceKind::S)));
}

#[test]
fn test_clear_full_rows_preserves_dimensions() {
    let mut rng = SimpleRng::new(77);
    let mut board = Board::new();

    for _ in 0..25 {
        // Random fill, with some rows forced full
        for y in 0..BOARD_HEIGHT as i32 {
            if rng.next_range(4) == 0 {
                fill_row(&mut board, y, PieceKind::Z);
            } else if rng.next_range(3) == 0 {
                let x = rng.next_range(BOARD_WIDTH as u32) as i32;
                board.set(x, y, Some(PieceKind::S)).unwrap();
            }
        }

        let full_before = (0..BOARD_HEIGHT as usize)
            .filter(|&y| board.is_row_full(y))
            .count();
        let cleared = board.clear_full_rows();

        assert_eq!(cleared, full_before);
        assert_eq!(board.width(), BOARD_WIDTH);
        assert_eq!(board.height(), BOARD_HEIGHT);
        assert_eq!(board.cells().len(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize));
        assert!((0..BOARD_HEIGHT as usize).all(|y| !board.is_row_full(y)));
        // Cleared rows come back as empty rows on top
        for y in 0..cleared {
            assert!(board.to_rows()[y].iter().all(|c| c.is_none()));
        }
    }
}

#[test]
fn test_custom_board_size() {
    let board = Board::with_size(6, 12).unwrap();
    assert_eq!(board.to_rows().len(), 12);
    assert!(board.to_rows().iter().all(|row| row.len() == 6));
    assert!(board.is_out_of_bounds(6, 0));
    assert!(!board.is_out_of_bounds(5, 11));
}

#[test]
fn test_board_clear() {
    let mut board = Board::new();
    fill_row(&mut board, 5, PieceKind::T);
    board.clear();
    assert_eq!(board.occupied_count(), 0);
}
