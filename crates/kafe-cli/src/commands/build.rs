use std::path::PathBuf;

use kafe_classfile::{ClassFile, Colors, dump};
use kafe_compiler::{CompileOptions, compile_program, write_class_file};

use super::{CliError, javap, load_source, require_program};
use crate::util::class_name_from_path;

pub struct BuildArgs {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub dump: bool,
    pub javap: bool,
    pub color: bool,
}

pub fn run(args: BuildArgs) -> Result<(), CliError> {
    let class_name =
        class_name_from_path(&args.input).ok_or_else(|| CliError::ClassName(args.input.clone()))?;
    let source = load_source(&args.input)?;
    let program = require_program(kafe_compiler::parse(&source))?;

    let bytes = compile_program(&program, &class_name, &CompileOptions::default())?;
    let path = write_class_file(&args.out_dir, &class_name, &bytes)?;

    if args.dump {
        let class = ClassFile::parse(&bytes)?;
        print!("{}", dump(&class, Colors::new(args.color)));
    }
    if args.javap {
        javap::run(&path);
    }
    Ok(())
}
