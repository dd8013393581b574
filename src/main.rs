use minefield::{Board, GameError, GameState, Position};
use std::env;
use std::io::{self, Write};

fn main() {
    env_logger::init();

    let (width, height, mines) = parse_args();
    match run_game(width, height, mines) {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

const DEFAULT_BOARD: (u32, u32, u32) = (10, 10, 10);

fn parse_args() -> (u32, u32, u32) {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_dimensions(&args)
}

/// Accepts the same argument forms as the original game, dispatched on the
/// raw argument count: `minefield [mines]`, `minefield [width height]`,
/// `minefield [width height mines]`. Bad numbers are reported and fall back
/// to the default board rather than silently shifting the form.
fn parse_dimensions(args: &[String]) -> (u32, u32, u32) {
    let mut numbers = Vec::new();
    for arg in args {
        match arg.parse() {
            Ok(n) => numbers.push(n),
            Err(_) => {
                eprintln!("Invalid number '{}', using a 10x10 board with 10 mines", arg);
                return DEFAULT_BOARD;
            }
        }
    }

    match numbers[..] {
        [] => DEFAULT_BOARD,
        [mines] => (10, 10, mines),
        [width, height] => (width, height, 10),
        [width, height, mines] => (width, height, mines),
        _ => {
            eprintln!("Usage: minefield [mines] | [width height] | [width height mines]");
            DEFAULT_BOARD
        }
    }
}

fn run_game(width: u32, height: u32, mines: u32) -> Result<(), GameError> {
    let mut board = Board::new(width, height, mines)?;

    loop {
        print_board(&board);
        println!("{} mines left", board.mines_left());

        let Some(command) = read_command() else {
            continue;
        };

        let result = match command {
            Command::Open(pos) => board.open(pos),
            Command::Mark(pos) => board.mark(pos),
            Command::Hint => board.hint(),
            Command::Reset => {
                // a new game is a wholesale replacement of the board
                board = Board::new(width, height, mines)?;
                continue;
            }
            Command::Quit => return Ok(()),
        };

        match result {
            Ok((GameState::Won, _)) => {
                print_board(&board);
                println!("Win!!");
                return Ok(());
            }
            Ok((GameState::Lost, _)) => {
                print_board(&board);
                println!("Loss!!");
                return Ok(());
            }
            Ok((GameState::Playing, _)) => {}
            Err(e) => println!("Error: {}", e),
        }
    }
}

enum Command {
    Open(Position),
    Mark(Position),
    Hint,
    Reset,
    Quit,
}

fn read_command() -> Option<Command> {
    print!("Enter command (o x y | m x y | h | r | q): ");
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).ok()?;
    let mut parts = input.split_whitespace();

    let command = match parts.next()? {
        "h" => Command::Hint,
        "r" => Command::Reset,
        "q" => Command::Quit,
        verb @ ("o" | "m") => {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            let pos = Position::new(x, y);
            if verb == "o" {
                Command::Open(pos)
            } else {
                Command::Mark(pos)
            }
        }
        _ => {
            println!("Unknown command. Use 'o' to open, 'm' to mark, 'h' for a hint, 'r' to reset, 'q' to quit");
            return None;
        }
    };
    Some(command)
}


fn print_board(board: &Board) {
    let (width, height) = board.dimensions();

    print!("   ");
    for x in 0..width {
        print!("{} ", x % 10);
    }
    println!();

    for y in 0..height {
        print!("{:2} ", y);
        for x in 0..width {
            let glyph = board.render(Position::new(x as i32, y as i32)).unwrap();
            // hidden cells print as dots so the board edge stays visible
            match glyph {
                ' ' => print!(". "),
                g => print!("{} ", g),
            }
        }
        println!();
    }
}
