use seabattle::{BitBoard, BitBoardError, Coord, Grid};

fn grid(cells: &[(usize, usize)]) -> Grid {
    cells.iter().map(|&(r, c)| Coord::new(r, c)).collect()
}

#[test]
fn test_insert_contains_remove() {
    let mut b = Grid::new();
    assert!(b.is_empty());
    b.insert(Coord::new(4, 7)).unwrap();
    assert!(b.contains(Coord::new(4, 7)));
    assert_eq!(b.len(), 1);
    b.remove(Coord::new(4, 7)).unwrap();
    assert!(b.is_empty());
}

#[test]
fn test_out_of_bounds() {
    let mut b = Grid::new();
    assert_eq!(
        b.insert(Coord::new(10, 0)),
        Err(BitBoardError::IndexOutOfBounds { row: 10, col: 0 })
    );
    assert!(!b.contains(Coord::new(0, 10)));
    assert!(Grid::try_from_cells([Coord::new(1, 1), Coord::new(1, 12)]).is_err());
}

#[test]
fn test_out_of_bounds_error_message() {
    let err = Grid::new().insert(Coord::new(3, 11)).unwrap_err();
    assert_eq!(err.to_string(), "index out of bounds: row=3, col=11");
    let source: &dyn std::error::Error = &err;
    assert!(source.source().is_none());
}

#[test]
fn test_full_board_uses_hundred_cells() {
    assert_eq!(Grid::full().len(), 100);
    assert_eq!(BitBoard::<u16, 4>::full().len(), 16);
    assert!(Grid::full().ring().is_empty());
}

#[test]
fn test_ring_in_corner() {
    let ring = grid(&[(0, 0)]).ring();
    assert_eq!(ring, grid(&[(0, 1), (1, 0), (1, 1)]));
}

#[test]
fn test_ring_does_not_wrap_across_rows() {
    let ring = grid(&[(3, 9)]).ring();
    assert_eq!(ring.len(), 5);
    assert!(!ring.contains(Coord::new(4, 0)));
    assert!(!ring.contains(Coord::new(3, 0)));
    assert!(!ring.contains(Coord::new(2, 0)));

    let ring = grid(&[(3, 0)]).ring();
    assert_eq!(ring.len(), 5);
    assert!(!ring.contains(Coord::new(2, 9)));
}

#[test]
fn test_ring_around_vertical_ship() {
    let ship = grid(&[(6, 9), (7, 9), (8, 9), (9, 9)]);
    let ring = ship.ring();
    let expected = grid(&[(5, 8), (5, 9), (6, 8), (7, 8), (8, 8), (9, 8)]);
    assert_eq!(ring, expected);
}

#[test]
fn test_iter_is_row_major() {
    let b = grid(&[(9, 0), (0, 9), (5, 5), (0, 1)]);
    let cells: Vec<Coord> = b.iter().collect();
    assert_eq!(
        cells,
        vec![Coord::new(0, 1), Coord::new(0, 9), Coord::new(5, 5), Coord::new(9, 0)]
    );
}

#[test]
fn test_set_operators() {
    let a = grid(&[(0, 0), (1, 1)]);
    let b = grid(&[(1, 1), (2, 2)]);
    assert_eq!(a & b, grid(&[(1, 1)]));
    assert_eq!((a | b).len(), 3);
    assert_eq!((!a).len(), 98);
}
