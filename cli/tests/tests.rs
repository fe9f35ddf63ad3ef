mod common;


use common::TestCli;
