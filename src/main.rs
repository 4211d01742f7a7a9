use othello_eval::{
    compute_stability, perspective, random_playout, BitBoard, EvalConfig, Evaluator, Player,
    Strategy, BLACK_TURN,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs;
use std::io::{self, Read};

const USAGE: &str = "使い方:
  othello-eval                               初期局面を評価
  othello-eval eval <file|-> [options]       盤面ファイル（- なら標準入力）を評価
  othello-eval random [plies] [seed] [options]
                                             ランダムに打ち進めながら評価値を表示
  othello-eval tables                        既定の重みを JSON で出力

options:
  --turn <-1|1>            手番指標（-1: 黒番, 1: 白番）
  --strategy <basic|stability>
  --weights <file>         重みの JSON ファイル";

/// コマンドラインのオプション
struct Options {
    positional: Vec<String>,
    turn: i32,
    strategy: Option<Strategy>,
    weights: Option<String>,
}

fn parse_options(args: &[String]) -> Result<Options, Box<dyn Error>> {
    let mut options = Options {
        positional: Vec::new(),
        turn: BLACK_TURN,
        strategy: None,
        weights: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--turn" => {
                let value = iter.next().ok_or("--turn には値が必要です")?;
                options.turn = value.parse()?;
            }
            "--strategy" => {
                let value = iter.next().ok_or("--strategy には値が必要です")?;
                let strategy = Strategy::from_name(value)
                    .ok_or_else(|| format!("不明な評価方式です: {}", value))?;
                options.strategy = Some(strategy);
            }
            "--weights" => {
                let value = iter.next().ok_or("--weights には値が必要です")?;
                options.weights = Some(value.clone());
            }
            _ => options.positional.push(arg.clone()),
        }
    }

    Ok(options)
}

fn build_evaluator(options: &Options) -> Result<Evaluator, Box<dyn Error>> {
    let config = match &options.weights {
        Some(path) => EvalConfig::load(path)?,
        None => EvalConfig::default(),
    };
    Ok(Evaluator::new(config))
}

fn main() {
    env_logger::init();

    // コマンドライン引数をチェック
    let args: Vec<String> = std::env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        None => report(&Evaluator::default(), &BitBoard::new(), BLACK_TURN, None),
        Some("eval") => run_eval(&args[2..]),
        Some("random") => run_random(&args[2..]),
        Some("tables") => run_tables(),
        Some("-h") | Some("--help") | Some("help") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) => Err(format!("不明なコマンドです: {}\n{}", other, USAGE).into()),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

/// 盤面ファイルを読み込んで評価する
fn run_eval(args: &[String]) -> Result<(), Box<dyn Error>> {
    let options = parse_options(args)?;
    let evaluator = build_evaluator(&options)?;

    let source = options
        .positional
        .first()
        .ok_or("盤面ファイルを指定してください")?;
    let text = if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(source)?
    };
    let board: BitBoard = text.parse()?;
    log::info!("loaded board from {}", source);

    report(&evaluator, &board, options.turn, options.strategy)
}

/// ランダムに打ち進めて各局面の評価値を表示する
fn run_random(args: &[String]) -> Result<(), Box<dyn Error>> {
    let options = parse_options(args)?;
    let evaluator = build_evaluator(&options)?;

    let plies: usize = match options.positional.first() {
        Some(value) => value.parse()?,
        None => 60,
    };
    let seed: u64 = match options.positional.get(1) {
        Some(value) => value.parse()?,
        None => rand::random(),
    };
    log::info!("random playout: plies={} seed={}", plies, seed);

    println!("手数 手番 段階 基本評価 段階評価 (黒番視点)");
    for ply in 0..=plies {
        let (board, next) = random_playout(&mut StdRng::seed_from_u64(seed), ply);
        let placed = board.occupied().count_ones() as usize - 4;
        if placed < ply {
            println!("両者パスのためゲーム終了");
            println!("{}", board);
            break;
        }

        println!(
            "{:>4} {} {} {:>8} {:>8}",
            ply,
            next.name(),
            othello_eval::game_phase(&board),
            evaluator.evaluate_basic(&board, BLACK_TURN),
            evaluator.evaluate_with_stability(&board, BLACK_TURN),
        );
        if ply == plies {
            println!("{}", board);
        }
    }

    Ok(())
}

fn run_tables() -> Result<(), Box<dyn Error>> {
    println!("{}", EvalConfig::default().to_json_pretty()?);
    Ok(())
}

/// 盤面と評価の内訳を表示
fn report(
    evaluator: &Evaluator,
    board: &BitBoard,
    turn: i32,
    strategy: Option<Strategy>,
) -> Result<(), Box<dyn Error>> {
    let (my, _) = perspective(turn);
    let stability = compute_stability(board);

    println!("{}", board);
    println!("評価側: {} (手番指標 {})", my, turn);
    println!("空きマス: {}", board.empty_count());
    println!("確定石: {}", stability.count());
    for player in [Player::Black, Player::White] {
        let moves: Vec<String> = board
            .valid_moves(player)
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("{}の合法手: {}", player, moves.join(" "));
    }

    if strategy.is_none() || strategy == Some(Strategy::Basic) {
        let terms = evaluator.basic_terms(board, turn);
        println!("基本評価: {:?}", terms);
        println!("  => {}", evaluator.evaluate_basic(board, turn));
    }
    if strategy.is_none() || strategy == Some(Strategy::Stability) {
        let (phase, terms) = evaluator.stability_terms(board, turn);
        println!("段階評価 [{}]: {:?}", phase, terms);
        println!("  => {}", evaluator.evaluate_with_stability(board, turn));
    }

    Ok(())
}
