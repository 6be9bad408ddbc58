//! convert-to-json
//!
//! `src/data/raw/mmr_map_kinder.xlsx`を`src/data/json/mmr_map_kinder_long.json`に変換する。
//! コマンドライン引数は取りません。ログは`RUST_LOG`で有効化できます。

use std::io;
use std::process;

use mmr_map_json::{report, ConverterBuilder};

fn main() {
    env_logger::init();

    let result = ConverterBuilder::new()
        .build()
        .and_then(|converter| converter.convert());

    let code = report(&result, &mut io::stdout().lock(), &mut io::stderr().lock());
    process::exit(code);
}
