use image::{DynamicImage, GenericImageView};

use crate::grid::{Cell, Maze, Point};

/// Parse a thresholded bitmap into a maze: dark pixels become walls, the
/// rest open ground. Start and goal are up to the caller.
pub fn parse_img(img: &DynamicImage) -> Result<Maze, anyhow::Error> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut cells = vec![vec![Cell::Wall; width]; height];

    for y in 0..height {
        for x in 0..width {
            let p = img.get_pixel(x as u32, y as u32);

            cells[y][x] = if p.0[0] < 128 { Cell::Wall } else { Cell::Open }
        }
    }

    Ok(Maze {
        width,
        height,
        cells,
    })
}

/// Render the maze with the visited cells numbered in walk order. Each
/// footprint shows the last digit of its 1-based visit number, so the
/// overlay stays one column wide on walks longer than nine cells.
pub fn render_footprints(maze: &Maze, footprints: &[Point]) -> String {
    let mut out = String::new();

    for y in 0..maze.height {
        for x in 0..maze.width {
            let here = Point { x, y };
            match footprints.iter().position(|&p| p == here) {
                Some(i) => out.push(char::from(b'0' + ((i + 1) % 10) as u8)),
                None => out.push(maze.cells[y][x].as_char()),
            }
        }
        out.push('\n');
    }

    out
}

/// Render the maze with `@` marking the walker: one frame of a watched run.
pub fn render_position(maze: &Maze, at: Point) -> String {
    let mut out = String::new();

    for y in 0..maze.height {
        for x in 0..maze.width {
            if (Point { x, y }) == at {
                out.push('@');
            } else {
                out.push(maze.cells[y][x].as_char());
            }
        }
        out.push('\n');
    }

    out
}
