use std::{path::PathBuf, sync::Arc};

use dirsize_cache::{CacheStore, Dirsize, JsonFileStore, Options};

// cargo run -- <root> [path] [--invalidate <path>] [--store <dir>]
// DIRSIZE_TRACE=DEBUG cargo run -- `pwd` src

fn main() {
    let mut args = std::env::args().skip(1);
    let mut positional = Vec::new();
    let mut invalidate = Vec::new();
    let mut store = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--invalidate" => invalidate.extend(args.next().map(PathBuf::from)),
            "--store" => store = args.next().map(PathBuf::from),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let Some(root) = positional.first().cloned() else {
        eprintln!("usage: dirsize <root> [path] [--invalidate <path>] [--store <dir>]");
        std::process::exit(2);
    };
    let path = positional.get(1).map_or(root.clone(), |path| root.join(path));

    let dirsize = Dirsize::new(Options {
        root: root.clone(),
        external_store: store.map(|dir| Arc::new(JsonFileStore::new(dir)) as Arc<dyn CacheStore>),
        ..Default::default()
    });
    for target in &invalidate {
        dirsize.invalidate(&root.join(target));
    }
    match dirsize.size(&path) {
        Some(size) => println!("{size}"),
        None => {
            println!("absent");
            std::process::exit(1);
        }
    }
}
