use seabattle::{
    block_around_sunk, block_hit_diagonals, Board, CellState, Coord, Impact, Orientation,
    ShipClass, ShipPlacement,
};

use Orientation::{Horizontal as H, Vertical as V};

fn board() -> Board {
    let p = |class, row, col, o| ShipPlacement::new(class, Coord::new(row, col), o);
    Board::new(&[
        p(ShipClass::Battleship, 0, 0, H),
        p(ShipClass::Cruiser, 2, 9, V),
        p(ShipClass::Cruiser, 9, 0, H),
        p(ShipClass::Destroyer, 3, 3, V),
        p(ShipClass::Destroyer, 7, 5, H),
        p(ShipClass::Destroyer, 3, 6, H),
        p(ShipClass::Boat, 9, 9, H),
        p(ShipClass::Boat, 5, 0, H),
        p(ShipClass::Boat, 7, 8, H),
        p(ShipClass::Boat, 0, 6, H),
    ])
    .unwrap()
}

fn sink(board: &mut Board, cells: &[(usize, usize)]) -> seabattle::Ship {
    let mut last = None;
    for &(r, c) in cells {
        last = Some(board.receive_shot(Coord::new(r, c)).unwrap());
    }
    match last {
        Some(Impact::Sunk(ship)) => ship,
        other => panic!("expected a sinking, got {:?}", other),
    }
}

#[test]
fn test_ring_around_sunk_battleship_in_corner() {
    let mut b = board();
    let ship = sink(&mut b, &[(0, 0), (0, 1), (0, 2), (0, 3)]);
    let blocked = block_around_sunk(&mut b, &ship);
    let expected: Vec<Coord> = [(0, 4), (1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]
        .iter()
        .map(|&(r, c)| Coord::new(r, c))
        .collect();
    assert_eq!(blocked, expected);
    for c in &expected {
        assert_eq!(b.cell(*c), Some(CellState::Blocked));
    }
    // The end cap along the axis is part of the ring.
    assert!(blocked.contains(&Coord::new(0, 4)));
}

#[test]
fn test_ring_skips_resolved_cells() {
    let mut b = board();
    b.receive_shot(Coord::new(4, 0)).unwrap();
    let ship = sink(&mut b, &[(5, 0)]);
    let blocked = block_around_sunk(&mut b, &ship);
    assert_eq!(
        blocked,
        vec![Coord::new(4, 1), Coord::new(5, 1), Coord::new(6, 0), Coord::new(6, 1)]
    );
    assert_eq!(b.cell(Coord::new(4, 0)), Some(CellState::Miss));
    assert!(block_around_sunk(&mut b, &ship).is_empty());
}

#[test]
fn test_vertical_cruiser_on_edge() {
    let mut b = board();
    let ship = sink(&mut b, &[(2, 9), (3, 9), (4, 9)]);
    let blocked = block_around_sunk(&mut b, &ship);
    assert_eq!(blocked.len(), 7);
    assert!(blocked.contains(&Coord::new(1, 9)));
    assert!(blocked.contains(&Coord::new(5, 9)));
    assert!(blocked.iter().all(|c| c.col >= 8));
}

#[test]
fn test_hit_blocks_diagonals() {
    let mut b = board();
    b.receive_shot(Coord::new(3, 3)).unwrap();
    let blocked = block_hit_diagonals(&mut b, Coord::new(3, 3));
    assert_eq!(
        blocked,
        vec![Coord::new(2, 2), Coord::new(2, 4), Coord::new(4, 2), Coord::new(4, 4)]
    );
    // Orthogonal neighbours stay open: the ship continues through one of them.
    assert_eq!(b.cell(Coord::new(4, 3)), Some(CellState::Occupied));
    assert_eq!(b.cell(Coord::new(3, 2)), Some(CellState::Empty));
}

#[test]
fn test_hit_diagonals_clipped_at_edge() {
    let mut b = board();
    b.receive_shot(Coord::new(9, 0)).unwrap();
    let blocked = block_hit_diagonals(&mut b, Coord::new(9, 0));
    assert_eq!(blocked, vec![Coord::new(8, 1)]);
}
