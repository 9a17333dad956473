use byte_bitset::{BitSet, BitSetError};
use std::collections::VecDeque;

const MAZE: [&str; 7] = [
    "S..#......",
    ".#.#.####.",
    ".#...#....",
    ".####.#.##",
    "......#...",
    "#.#####.#.",
    "..........",
];

/// Breadth-first search over the maze, returning the cells reachable from `S`.
fn reachable(width: usize, height: usize) -> Result<BitSet, BitSetError> {
    let mut visited = BitSet::new((width * height) as u64)?;
    let mut queue = VecDeque::from([(0usize, 0usize)]);
    visited.set(0)?;

    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbours {
            if nx >= width || ny >= height || MAZE[ny].as_bytes()[nx] == b'#' {
                continue;
            }
            let idx = (ny * width + nx) as u64;
            if !visited.test(idx)? {
                visited.set(idx)?;
                queue.push_back((nx, ny));
            }
        }
    }
    Ok(visited)
}

fn main() -> Result<(), BitSetError> {
    let (width, height) = (MAZE[0].len(), MAZE.len());
    let visited = reachable(width, height)?;

    for (y, row) in MAZE.iter().enumerate() {
        let line: String = row
            .chars()
            .enumerate()
            .map(|(x, c)| match visited.test((y * width + x) as u64) {
                Ok(true) if c == '.' => 'o',
                _ => c,
            })
            .collect();
        println!("{line}");
    }
    println!(
        "{} of {} cells reachable, visited-set {}",
        visited.count_ones(),
        visited.bit_count(),
        visited.to_hex()
    );
    Ok(())
}
