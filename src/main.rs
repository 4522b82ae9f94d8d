use fixed_graph::app;

fn main() -> anyhow::Result<()> {
    app::main()
}
