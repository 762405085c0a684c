// command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;

use crate::core::{
    Ai, COMMAND_TIMEOUT, FileTree, Safety, Sandbox, Session, Step, StepKind, StepStatus, archive,
    parse_artifact,
};
use crate::{Error, Provider, Server, TemplateKind};

#[derive(Parser)]
#[command(
    name = "nlsite",
    about = "Describe a website in plain english, get a runnable project"
)]
struct Cli {
    /// ai provider (gemini, claude)
    #[arg(long, short = 'p', default_value = "gemini", global = true)]
    provider: Provider,

    /// api key for the ai provider
    #[arg(long, short = 'k', global = true)]
    api_key: Option<String>,

    /// ask for confirmation before running plan commands
    #[arg(long, short)]
    confirm: bool,

    /// project directory (default: throwaway scratch dir)
    #[arg(long, short, global = true)]
    dir: Option<PathBuf>,

    /// starter template
    #[arg(long, short, default_value = "auto", global = true)]
    template: TemplateArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TemplateArg {
    Auto,
    React,
    Node,
}

impl TemplateArg {
    // auto means let the model classify
    fn pick(self) -> Option<TemplateKind> {
        match self {
            TemplateArg::Auto => None,
            TemplateArg::React => Some(TemplateKind::React),
            TemplateArg::Node => Some(TemplateKind::Node),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, default_value = "3000", env = "PORT")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// scaffold a project from one prompt, no tui
    Build {
        /// what to build
        prompt: String,

        /// output directory (overrides --dir)
        #[arg(long)]
        out: Option<PathBuf>,

        /// execute the plan's shell commands after writing files
        #[arg(long)]
        run: bool,

        /// write a zip archive of the project
        #[arg(long)]
        zip: bool,
    },
}

pub async fn run() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host }) => {
            env_logger::init();
            Ok(Server::run(cli.provider, cli.api_key, &host, port).await?)
        }

        Some(Commands::Build {
            prompt,
            out,
            run,
            zip,
        }) => {
            env_logger::init();
            Ok(build(BuildArgs {
                provider: cli.provider,
                api_key: cli.api_key,
                template: cli.template.pick(),
                prompt,
                dir: out.or(cli.dir),
                run_commands: run,
                zip,
            })
            .await?)
        }

        None => Ok(crate::tui::run(
            cli.provider,
            cli.api_key,
            cli.confirm,
            cli.dir,
            cli.template.pick(),
        )
        .await?),
    }
}

struct BuildArgs {
    provider: Provider,
    api_key: Option<String>,
    template: Option<TemplateKind>,
    prompt: String,
    dir: Option<PathBuf>,
    run_commands: bool,
    zip: bool,
}

// headless one-shot: template, plan, files on disk, optional commands
async fn build(args: BuildArgs) -> Result<(), Error> {
    let ai = Ai::new(args.provider, args.api_key)?;

    let kind = match args.template {
        Some(kind) => kind,
        None => ai.classify_template(&args.prompt).await?,
    };
    println!("template: {}", kind.name());

    let mut session = Session::new();
    session.seed(&kind.prompts(), &args.prompt);

    // starter files first, then whatever the model plans on top
    let mut steps = parse_artifact(kind.base_artifact(), 1);
    let next_id = steps.last().map(|s| s.id + 1).unwrap_or(1);

    let reply = ai.generate_plan(&session.messages).await?;
    session.push_assistant(reply.clone());
    let generated = parse_artifact(&reply, next_id);
    if generated.is_empty() {
        println!("warning: no build steps found in the model reply");
    }
    steps.extend(generated);

    let mut tree = FileTree::new();
    let outcome = tree.apply(&mut steps);

    let sandbox = match args.dir {
        Some(dir) => Sandbox::at(dir)?,
        None => {
            let sandbox = Sandbox::ephemeral()?;
            println!("using scratch directory (discarded on exit); pass --out to keep the files");
            sandbox
        }
    };
    let written = sandbox.sync(&tree)?;
    println!("wrote {written} files to {}", sandbox.root().display());

    for (step_id, command) in outcome.commands {
        let safety = Safety::check(&command);
        if safety.is_dangerous {
            set_status(&mut steps, step_id, StepStatus::Failed);
            println!("blocked `{command}`: {}", safety.reason);
            continue;
        }
        if !args.run_commands {
            println!("plan command (pass --run to execute): {command}");
            continue;
        }
        if let Some(warning) = &safety.warning {
            println!("warning: {warning}");
        }
        set_status(&mut steps, step_id, StepStatus::Running);
        println!("running `{command}`");
        let run = sandbox.run(&command, COMMAND_TIMEOUT).await?;
        if run.timed_out {
            set_status(&mut steps, step_id, StepStatus::Failed);
            println!("`{command}` timed out");
        } else if run.success() {
            set_status(&mut steps, step_id, StepStatus::Completed);
        } else {
            set_status(&mut steps, step_id, StepStatus::Failed);
            println!("`{command}` exited with {}", run.exit_code);
            if !run.stderr.is_empty() {
                eprintln!("{}", run.stderr.trim_end());
            }
        }
    }

    if args.zip {
        let name = project_name(&steps);
        let path = archive::export_zip(&tree, &name)?;
        println!("archive: {}", path.display());
    }

    println!();
    for step in &steps {
        println!("  [{}] {}", glyph(step.status), step.title);
    }

    Ok(())
}

fn set_status(steps: &mut [Step], id: usize, status: StepStatus) {
    if let Some(step) = steps.iter_mut().find(|s| s.id == id) {
        step.status = status;
    }
}

// the model's artifact title names the project; the starter's is a fallback
fn project_name(steps: &[Step]) -> String {
    steps
        .iter()
        .rev()
        .find(|s| s.kind == StepKind::CreateFolder)
        .map(|s| s.title.clone())
        .unwrap_or_else(|| "project".to_string())
}

fn glyph(status: StepStatus) -> char {
    match status {
        StepStatus::Pending => ' ',
        StepStatus::Running => '~',
        StepStatus::Completed => '+',
        StepStatus::Failed => 'x',
    }
}
