use itertools::Itertools;
use minesweeper_sync::{
    BoardConfig, Command, Coordinate, GameError, Outcome, SessionController, HELP_TEXT,
};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    match run_game() {
        Ok(_) => println!("Thanks for playing!"),
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game() -> anyhow::Result<()> {
    let mut session = SessionController::new(BoardConfig::default())?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if !session.is_game_over() {
            print_board(&session);
        }

        print!("command (h for help): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };

        let outcome = line?
            .parse::<Command>()
            .and_then(|command| session.dispatch(command));

        match outcome {
            Ok(Outcome::Quit) => return Ok(()),
            Ok(Outcome::Help) => println!("{}", HELP_TEXT),
            Ok(Outcome::Lost) => {
                print_board(&session);
                println!("Game Over!");
            }
            Ok(Outcome::Won) => {
                print_board(&session);
                println!("You Win!!!");
            }
            Ok(Outcome::Restarted) => println!("Restarting"),
            Ok(_) => {}
            Err(GameError::NothingToUndo) => println!("Cannot undo"),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn print_board(session: &SessionController) {
    let board = session.board();
    let (width, height) = board.dimensions();
    let map = board.render();
    let cell = width.to_string().len().max(height.to_string().len());

    // Print column numbers
    println!(
        "{:>cell$} {}",
        "",
        (1..=width).map(|x| format!("{:>cell$}", x)).join(" "),
    );

    // Print rows
    for y in 1..=height {
        let row = (1..=width)
            .map(|x| {
                let tile = map[&Coordinate::new(x as i32, y as i32)];
                format!("{:>cell$}", tile)
            })
            .join(" ");
        println!("{:>cell$} {}", y, row);
    }
}
