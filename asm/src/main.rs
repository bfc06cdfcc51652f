use a65::dump::print_dump;
use a65::objmap::ObjectMap;
use a65::source::read_lines;
use a65::{assemble, Error};
use color_print::cprintln;
use std::path::Path;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input file (`-` reads stdin)
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output image [default: input with `.bin`]
    #[clap(short, long)]
    output: Option<String>,

    /// Write a YAML object map (globals, externs, relocations)
    #[clap(short, long)]
    map: Option<String>,

    /// Dump symbols, relocations and code
    #[clap(short, long)]
    dump: bool,
}

impl Args {
    fn output(&self) -> String {
        match &self.output {
            Some(path) => path.clone(),
            None if self.input == "-" => "out.bin".to_string(),
            None => Path::new(&self.input)
                .with_extension("bin")
                .to_string_lossy()
                .into_owned(),
        }
    }
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    if let Err(err) = run(&args) {
        cprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    println!("6502 Assembler");

    println!("1. Read Source");
    println!("  < {}", args.input);
    let lines = read_lines(&args.input)?;

    println!("2. Assemble");
    let asm = assemble(&lines)?;
    for msg in &asm.msgs {
        let raw = msg
            .line
            .checked_sub(1)
            .and_then(|idx| lines.get(idx))
            .map_or("", String::as_str);
        msg.print(&args.input, raw);
    }
    println!(
        "  {} pass(es), {} symbol(s), {} error(s), {} warning(s)",
        asm.passes,
        asm.symbols().len(),
        asm.errors(),
        asm.warnings()
    );
    let Some(image) = asm.image() else {
        return Err(Error::Failed(asm.errors()));
    };

    println!("3. Write Output");
    let output = args.output();
    println!("  > {} ({} bytes)", output, image.len());
    std::fs::write(&output, image).map_err(|e| Error::FileWrite(output.clone(), e))?;
    if let Some(path) = &args.map {
        println!("  > {}", path);
        let yaml = ObjectMap::new(&asm).to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| Error::FileWrite(path.clone(), e))?;
    }

    if args.dump {
        print_dump(&asm);
    }
    Ok(())
}
