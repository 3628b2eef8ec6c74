//! 命令行客户端
//!
//! 单个参数选择操作，对运行中的服务器直接发 HTTP 请求，
//! 用来手工验证各个接口。

use std::env;

use reqwest::StatusCode;

use product_rest::app::product::{model::Product, seed};

const BASE_URL: &str = "http://localhost:8888";
const FIXTURE_PATH: &str = "data.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Please provide an argument.");
        return Ok(());
    }

    let client = reqwest::Client::new();

    match args[1].as_str() {
        "db" => {
            println!("Adding data to DB");
            seed::add_all_products(BASE_URL, FIXTURE_PATH).await?;
        }
        "c" => {
            println!("Making a POST request");
            create(&client, &Product::new("0", "TEST", "POLLA LEFTA", "FULL")).await?;
        }
        "r" => {
            println!("Making a GET request");
            read(&client, 1, 30).await?;
        }
        "u" => {
            println!("Making a PUT request");
            // 注意使用一个库里存在的 id
            update(&client, &Product::new("0", "TEST", "TEST", "TEST")).await?;
        }
        "d" => {
            println!("Making a DELETE request");
            delete(&client, "1").await?;
        }
        _ => print_usage(),
    }

    Ok(())
}

fn print_usage() {
    println!("Unknown request. Please use 'db', 'c', 'r', 'u', or 'd'.");
    println!();
    println!("  db - load every product from {} via POST", FIXTURE_PATH);
    println!("  c  - create a single hardcoded product");
    println!("  r  - list products (page 1, limit 30)");
    println!("  u  - update a hardcoded product");
    println!("  d  - delete product with id 1");
}

async fn create(client: &reqwest::Client, product: &Product) -> Result<(), reqwest::Error> {
    let resp = client
        .post(format!("{}/products", BASE_URL))
        .json(product)
        .send()
        .await?;

    if resp.status() == StatusCode::CREATED {
        println!("POST request successful!");
    } else {
        println!("POST request failed with status: {}", resp.status());
    }

    Ok(())
}

async fn read(client: &reqwest::Client, page: i64, limit: i64) -> Result<(), reqwest::Error> {
    let resp = client
        .get(format!("{}/products?page={}&limit={}", BASE_URL, page, limit))
        .send()
        .await?;

    if resp.status() == StatusCode::OK {
        let products: Vec<Product> = resp.json().await?;
        for p in products {
            println!(
                "ID: {}, Name: {}, Price: {}, Quantity: {}",
                p.id, p.name, p.price, p.quantity
            );
        }
    } else {
        println!("GET request failed with status: {}", resp.status());
    }

    Ok(())
}

async fn update(client: &reqwest::Client, product: &Product) -> Result<(), reqwest::Error> {
    let resp = client
        .put(format!("{}/product?id={}", BASE_URL, product.id))
        .json(product)
        .send()
        .await?;

    if resp.status() == StatusCode::OK {
        let p: Product = resp.json().await?;
        println!(
            "ID: {}, Name: {}, Price: {}, Quantity: {}",
            p.id, p.name, p.price, p.quantity
        );
    } else {
        println!("PUT request failed with status: {}", resp.status());
    }

    Ok(())
}

async fn delete(client: &reqwest::Client, id: &str) -> Result<(), reqwest::Error> {
    let resp = client
        .delete(format!("{}/product?id={}", BASE_URL, id))
        .send()
        .await?;

    if resp.status() == StatusCode::NO_CONTENT {
        println!("Product deleted successfully");
    } else {
        println!("DELETE request failed with status: {}", resp.status());
    }

    Ok(())
}
