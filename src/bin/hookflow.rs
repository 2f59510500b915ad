use hookflow::hooks;
use std::io;

const USAGE: &str = "usage: hookflow <prompt | tool | workflow start <workflow-id>>";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut stdin = io::stdin().lock();

    let output = match args.as_slice() {
        ["prompt"] => hooks::run_prompt_hook(&mut stdin),
        ["tool"] => hooks::run_tool_hook(&mut stdin),
        ["workflow", "start", workflow_id] => hooks::run_workflow_start(workflow_id, &mut stdin),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    // No output means nothing workflow-related to say this turn; the hook
    // still exits 0 so the host never blocks on our account.
    if let Some(message) = output {
        println!("{message}");
    }
}
