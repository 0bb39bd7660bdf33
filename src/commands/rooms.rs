use anyhow::{Context, Result};

use hostel_rooms::allocation::{Allocation, AllocationRequest, RoomService};
use hostel_rooms::config::Config;
use hostel_rooms::error::Error;
use hostel_rooms::models::{Room, RoomFilter};
use hostel_rooms::storage::create_sqlite_repository;

fn open_service(config: &Config) -> Result<RoomService> {
    let repo = create_sqlite_repository(&config.database.sqlite_path).with_context(|| {
        format!(
            "Failed to open room database: {}",
            config.database.sqlite_path.display()
        )
    })?;
    Ok(RoomService::new(repo))
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn print_rooms(rooms: &[Room]) {
    if rooms.is_empty() {
        println!("No rooms found.");
        return;
    }

    println!("{:<12} {:>8} {:>4} {:>9}", "Room", "Capacity", "AC", "Washroom");
    println!("{:-<36}", "");
    for room in rooms {
        println!(
            "{:<12} {:>8} {:>4} {:>9}",
            room.room_no,
            room.capacity,
            yes_no(room.has_ac),
            yes_no(room.has_attached_washroom)
        );
    }
    println!();
    println!("{} room(s)", rooms.len());
}

pub async fn add(
    config: &Config,
    room_no: String,
    capacity: u32,
    ac: bool,
    washroom: bool,
) -> Result<()> {
    let service = open_service(config)?;
    let room = Room::new(room_no, capacity, ac, washroom);

    match service.add_room(room).await {
        Ok(room) => {
            println!("Room {} added.", room.room_no);
            Ok(())
        }
        Err(Error::DuplicateRoom { room_no }) => {
            anyhow::bail!("Room {room_no} is already added")
        }
        Err(e) => Err(e).context("Failed to add room"),
    }
}

pub async fn list(config: &Config) -> Result<()> {
    let service = open_service(config)?;
    let rooms = service.list_rooms().await.context("Failed to list rooms")?;
    print_rooms(&rooms);
    Ok(())
}

pub async fn search(config: &Config, capacity: u32, ac: bool, washroom: bool) -> Result<()> {
    let service = open_service(config)?;
    let rooms = service
        .search_rooms(RoomFilter::new(capacity, ac, washroom))
        .await
        .context("Failed to search rooms")?;
    print_rooms(&rooms);
    Ok(())
}

pub async fn allocate(config: &Config, students: u32, ac: bool, washroom: bool) -> Result<()> {
    let service = open_service(config)?;
    let allocation = service
        .allocate(AllocationRequest::new(students, ac, washroom))
        .await
        .context("Failed to allocate room")?;

    match allocation {
        Allocation::Allocated(room) => {
            println!(
                "Allocated room {} (capacity {}, AC: {}, washroom: {})",
                room.room_no,
                room.capacity,
                yes_no(room.has_ac),
                yes_no(room.has_attached_washroom)
            );
        }
        Allocation::NoRoomAvailable => println!("No room available"),
    }
    Ok(())
}
