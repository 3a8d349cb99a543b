use artillery_solver::*;

fn main() {
    let origin = Point::new(1, 1);
    let grid_size = 100;
    let targets = [
        Point::new(2, 1),
        Point::new(1, 2),
        Point::new(0, 0),
        Point::new(-1, -1),
    ];

    match Solver::with_grid_size(origin, grid_size) {
        Ok(mut solver) => {
            println!("Initializing fire mission...");
            println!("  Origin:    {}", solver.origin());
            println!("  Grid Size: {} m", solver.grid_size());

            // Asking before a target is set is reported, not panicked on.
            if let Err(e) = solver.solve() {
                println!("  Before targeting: {}", e);
            }

            println!("\nSolving...");
            for target in targets {
                solver.set_target(target);
                match solver.solve() {
                    Ok(solution) => println!("Target {:>9}: {}", target.label(), solution),
                    Err(e) => {
                        eprintln!("Error solving for target {}: {:?}", target, e);
                        break;
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to create solver: {}", e);
        }
    }
}
